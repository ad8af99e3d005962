pub mod order_book;
pub mod order_flow;
pub mod queue;

use std::env;
use std::sync::LazyLock;


pub static VERBOSE: LazyLock<bool> = LazyLock::new(||
    {
        env::var("VERBOSE").is_ok_and(|verbose| verbose.eq_ignore_ascii_case("true"))
    });
