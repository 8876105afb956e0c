mod admin;
mod member;
mod reminder;
mod special_date;
mod status;

pub mod dtos {
    pub use crate::admin::dtos::*;
    pub use crate::member::dtos::*;
    pub use crate::reminder::dtos::*;
    pub use crate::special_date::dtos::*;
}

pub use crate::admin::api::*;
pub use crate::member::api::*;
pub use crate::reminder::api::*;
pub use crate::special_date::api::*;
pub use crate::status::api::*;
