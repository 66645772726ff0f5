pub mod classify;
pub mod copy;
pub mod scan;
pub mod select;
