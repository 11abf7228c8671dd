pub mod datetime_input;
