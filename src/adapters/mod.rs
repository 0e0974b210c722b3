pub mod mock_handler;

#[cfg(test)]
mod mock_handler_test;
