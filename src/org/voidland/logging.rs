use flexi_logger::DeferredNow;
use flexi_logger::FlexiLoggerError;
use flexi_logger::Logger;
use flexi_logger::LoggerHandle;
use log::Record;

use std::io::Write;
use std::sync::Mutex;
use std::sync::OnceLock;


static LOGGER_HANDLE: OnceLock<Mutex<LoggerHandle>> = OnceLock::new();


/// Starts logging to stderr at `logLevel` (a flexi_logger spec such as
/// "info" or "debug, voidland_queue=trace"). Later calls are no-ops.
pub fn init_logging(logLevel: Option<&str>) -> Result<(), FlexiLoggerError>
{
    if LOGGER_HANDLE.get().is_some()
    {
        return Ok(());
    }

    let handle: LoggerHandle = Logger::try_with_env_or_str(logLevel.unwrap_or("info"))?
        .format(queueFormat)
        .start()?;
    let _ = LOGGER_HANDLE.set(Mutex::new(handle));

    Ok(())
}

fn queueFormat(w: &mut dyn Write, now: &mut DeferredNow, record: &Record) -> std::io::Result<()>
{
    write!(
        w,
        "{} {:<5} [{}] {}",
        now.format("%H:%M:%S%.3f"),
        record.level(),
        std::thread::current().name().unwrap_or("-"),
        record.args()
    )
}
