//! Infrastructure layer
//!
//! Wire formats and the transport adapters that implement the domain ports.

pub mod dto;
pub mod http_api;
pub mod routes;
pub mod websocket;

pub use http_api::HttpChatApi;
pub use routes::ChatRoutes;
pub use websocket::WebSocketConnector;
