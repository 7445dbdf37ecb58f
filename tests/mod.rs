// Integration tests for coca

pub mod helpers;
