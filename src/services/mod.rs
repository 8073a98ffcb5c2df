pub mod approov;
