//! Delimited-file ingress and egress for tabmask.

pub mod table_reader;
pub mod table_writer;

pub use table_reader::{read_table, TableReadError};
pub use table_writer::{write_table, TableWriteError};
