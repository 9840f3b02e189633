pub mod encounter;
pub mod logging;
