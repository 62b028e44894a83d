pub mod test_setup;
