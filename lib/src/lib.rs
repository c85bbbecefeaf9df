pub mod bridge_capability;
pub mod campaign;
pub mod campaign_dispatcher;
pub mod capability;
pub mod connection_state;
pub mod dispatch_settings;
pub mod environment;
pub mod error;
pub mod http_gateway;
pub mod message_variation;
pub mod pacer;
pub mod participant;
pub mod shutdown;
