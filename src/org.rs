pub mod voidland;
