pub mod capture_backend;
