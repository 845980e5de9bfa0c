pub mod errors;
pub mod db;
pub mod peak;

#[cfg(test)]
mod tests;
