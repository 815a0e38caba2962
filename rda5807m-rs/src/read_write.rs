use embedded_hal::i2c::{Error, ErrorKind, I2c};

use crate::settings::WRITABLE_REGISTER_COUNT;

// register pointer plus every writable word
const MAX_WRITE_FRAME: usize = 1 + 2 * WRITABLE_REGISTER_COUNT as usize;

/// Block transport to a register-addressed device.
///
/// Register words go over the wire high byte first. Implementations do not
/// retry; a failed transfer is reported as the bus error kind.
#[cfg_attr(test, mockall::automock)]
pub trait ReadWrite {
    fn read_many(&mut self, address: u8, register: u8, buffer: &mut [u8]) -> Result<(), ErrorKind>;

    fn write_many(&mut self, address: u8, register: u8, values: &[u8]) -> Result<(), ErrorKind>;
}

impl<T> ReadWrite for T
where
    T: I2c,
{
    fn read_many(&mut self, address: u8, register: u8, buffer: &mut [u8]) -> Result<(), ErrorKind> {
        self.write_read(address, &[register], buffer)
            .map_err(|e| e.kind())
    }

    fn write_many(&mut self, address: u8, register: u8, values: &[u8]) -> Result<(), ErrorKind> {
        let mut frame = [0u8; MAX_WRITE_FRAME];
        let frame = frame
            .get_mut(..values.len() + 1)
            .ok_or(ErrorKind::Other)?;

        frame[0] = register;
        frame[1..].copy_from_slice(values);

        self.write(address, frame).map_err(|e| e.kind())
    }
}
