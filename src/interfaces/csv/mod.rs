pub mod confirmation_writer;
pub mod script_reader;
