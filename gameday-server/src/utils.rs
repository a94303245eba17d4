#[cfg(test)]
pub mod unreachable_database;
pub mod time_source;
