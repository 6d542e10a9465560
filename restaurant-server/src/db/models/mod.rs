//! Database Models
//!
//! 每个资源: 实体 (存储形态) + Create / Update 请求体

pub mod food;
pub mod invoice;
pub mod menu;
pub mod order;
pub mod order_item;
pub mod serde_helpers;
pub mod table;
pub mod user;

pub use food::{Food, FoodCreate, FoodUpdate};
pub use invoice::{Invoice, InvoiceCreate, InvoiceUpdate};
pub use menu::{Menu, MenuCreate, MenuUpdate};
pub use order::{Order, OrderCreate, OrderUpdate};
pub use order_item::{OrderItem, OrderItemCreate, OrderItemLine, OrderItemPack, OrderItemUpdate};
pub use table::{Table, TableCreate, TableUpdate};
pub use user::{LoginRequest, RefreshRequest, SignupRequest, TokenUpdate, User, UserResponse};
