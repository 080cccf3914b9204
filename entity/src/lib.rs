pub mod prelude;

pub mod customer_machine;
pub mod machine_model;
pub mod operating_time;
pub mod resource;
pub mod revoked_token;
pub mod rotation;
pub mod user;
