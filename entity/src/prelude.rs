pub use super::customer_machine::Entity as CustomerMachine;
pub use super::machine_model::Entity as MachineModel;
pub use super::operating_time::Entity as OperatingTime;
pub use super::revoked_token::Entity as RevokedToken;
pub use super::rotation::Entity as Rotation;
pub use super::user::Entity as User;
