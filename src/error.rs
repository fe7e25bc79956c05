use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no Blynclight found (vendor {vendor_id:#06x}, product {product_id:#06x})")]
    DeviceNotFound { vendor_id: u16, product_id: u16 },

    #[error("cannot set up USB device: {0}")]
    Usb(#[source] rusb::Error),

    #[error("USB control transfer failed: {0}")]
    Transfer(#[source] rusb::Error),

    #[error("simulator protocol violation: {0}")]
    Protocol(String),

    #[error("interrupted")]
    Interrupted,

    #[error("simulator pipe failed: {0}")]
    Simulator(#[from] std::io::Error),

    #[error("simulator window failed: {0}")]
    Window(String),

    #[error("cannot load settings: {0}")]
    Config(#[from] config_file::ConfigFileError),
}
