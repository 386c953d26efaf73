pub mod validator;

pub use validator::{parse_charge, validate, ValidationError, Validator};
