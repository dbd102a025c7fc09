/// Inbound ports (Driving ports) - Use case interfaces
///
/// These ports define the interfaces that external adapters (e.g., the
/// Slack listener) use to interact with the application core.
pub mod command_port;

pub use command_port::CommandPort;
