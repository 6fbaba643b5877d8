//! Data models for Telinv

pub mod equipment;
pub mod equipment_type;
pub mod user;

// Re-export commonly used types
pub use equipment::{Equipment, EquipmentDetail, Visibility};
pub use equipment_type::EquipmentType;
pub use user::User;
