//! Embrava Blynclight (BLYNCUSB30-152) over USB.
//!
//! The light has no read-back. Every color is one class-specific control
//! transfer carrying an 8 byte report:
//!
//! ```text
//! [red, blue, green, 0x00, 0x00, 0x00, 0xff, 0xff]
//! ```
//!
//! The channel order is what the hardware expects and must not be changed.

use std::time::Duration;

use rusb::{DeviceHandle, GlobalContext, UsbContext};

use crate::color::Color;
use crate::device::Device;
use crate::error::{Error, Result};

pub const VENDOR_ID: u16 = 0x0e53;
pub const PRODUCT_ID: u16 = 0x2516;

/// Host to device, class request, interface recipient.
pub const REQUEST_TYPE: u8 = 0x21;
/// HID SET_REPORT.
pub const REQUEST: u8 = 0x09;
pub const VALUE: u16 = 0x0200;
pub const INDEX: u16 = 0x0000;

/// libusb treats a zero timeout as "wait forever".
const NO_TIMEOUT: Duration = Duration::ZERO;

pub fn color_report(color: &Color) -> [u8; 8] {
    let [red, blue, green] = color.clamp_to_device_range();
    [red, blue, green, 0x00, 0x00, 0x00, 0xff, 0xff]
}

/// Where color reports go. Implemented by an open libusb handle.
pub trait ControlPipe {
    fn write_report(&mut self, report: &[u8; 8]) -> rusb::Result<usize>;
}

impl<T: UsbContext> ControlPipe for DeviceHandle<T> {
    fn write_report(&mut self, report: &[u8; 8]) -> rusb::Result<usize> {
        self.write_control(REQUEST_TYPE, REQUEST, VALUE, INDEX, report, NO_TIMEOUT)
    }
}

pub struct Blynclight<P = DeviceHandle<GlobalContext>> {
    pipe: P,
    color: Color,
}

impl Blynclight {
    /// Opens the first attached Blynclight and takes it over from the
    /// kernel.
    pub fn open() -> Result<Blynclight> {
        let mut handle = rusb::open_device_with_vid_pid(VENDOR_ID, PRODUCT_ID).ok_or(
            Error::DeviceNotFound {
                vendor_id: VENDOR_ID,
                product_id: PRODUCT_ID,
            },
        )?;

        if rusb::supports_detach_kernel_driver() {
            detach_kernel_drivers(&mut handle)?;
        }

        let configuration = handle
            .device()
            .config_descriptor(0)
            .map_err(Error::Usb)?
            .number();
        handle
            .set_active_configuration(configuration)
            .map_err(Error::Usb)?;

        log::info!(
            "Opened Blynclight {:04x}:{:04x} on bus {} address {}",
            VENDOR_ID,
            PRODUCT_ID,
            handle.device().bus_number(),
            handle.device().address()
        );

        Ok(Blynclight::with_pipe(handle))
    }
}

impl<P: ControlPipe> Blynclight<P> {
    pub fn with_pipe(pipe: P) -> Blynclight<P> {
        Blynclight {
            pipe,
            color: Color::OFF,
        }
    }
}

impl<P: ControlPipe> Device for Blynclight<P> {
    fn set_color(&mut self, color: Color) -> Result<()> {
        let report = color_report(&color);
        self.pipe.write_report(&report).map_err(Error::Transfer)?;
        log::debug!("{} {} {}", report[0], report[1], report[2]);
        self.color = color;
        Ok(())
    }

    fn get_color(&self) -> Color {
        self.color
    }
}

fn detach_kernel_drivers<T: UsbContext>(handle: &mut DeviceHandle<T>) -> Result<()> {
    let device = handle.device();
    let descriptor = device.device_descriptor().map_err(Error::Usb)?;

    for index in 0..descriptor.num_configurations() {
        let config = device.config_descriptor(index).map_err(Error::Usb)?;
        for interface in config.interfaces() {
            let number = interface.number();
            if handle.kernel_driver_active(number).map_err(Error::Usb)? {
                log::debug!("Detaching kernel driver from interface {}", number);
                handle.detach_kernel_driver(number).map_err(Error::Usb)?;
            }
        }
    }

    Ok(())
}
