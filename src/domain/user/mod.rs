// User domain module
// Email value object and the organizational domain gate

pub mod identity_gate;
pub mod value_objects;

pub use identity_gate::IdentityGate;
pub use value_objects::Email;
