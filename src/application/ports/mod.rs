pub mod identity_ports;
pub mod storage_ports;
pub mod trash_ports;
