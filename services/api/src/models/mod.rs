//! API models for entities and request/response payloads
//!
//! Wire field names follow the external interface exactly (`idperfume`,
//! `cantidad`, `correo`, `contraseña`, ...), with `#[serde(rename)]` where
//! the name is not a usable Rust identifier.

pub mod order;
pub mod perfume;
pub mod user;

// Re-export for convenience
pub use order::{
    AdminOrderRow, Order, OrderItemRequest, OrderLine, OrderStatus, UpdateOrderRequest,
    ValidOrderItem,
};
pub use perfume::{CartItem, EnrichedCartItem, NewPerfume, Perfume, PerfumeWithBrand, Seleccion};
pub use user::{
    LoginRequest, LoginResponse, LoginUser, RegisterRequest, RegisteredUser, UpdateProfileRequest,
    User, UserProfile,
};
