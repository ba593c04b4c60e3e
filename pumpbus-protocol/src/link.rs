//! Frame exchange over a half-duplex UART
//!
//! Wraps the bus UART together with the transceiver's driver-enable pin.
//! Arbitration (who may talk when) is left to the node application; the
//! link only guarantees that each frame goes out whole and that each
//! received frame is complete and verified before it is returned.

use core::fmt;

use pumpbus_hal::{OutputPin, UartRx, UartTx};

use crate::frame::{FrameError, WireFrame, MAX_FRAME_LEN};

/// Errors from sending or receiving a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError<E> {
    /// The UART reported an error
    Uart(E),
    /// The bytes did not form a valid frame
    Frame(FrameError),
}

impl<E> From<FrameError> for LinkError<E> {
    fn from(e: FrameError) -> Self {
        LinkError::Frame(e)
    }
}

impl<E: fmt::Debug> fmt::Display for LinkError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::Uart(e) => write!(f, "uart error: {e:?}"),
            LinkError::Frame(e) => write!(f, "{e}"),
        }
    }
}

/// One node's connection to the bus
pub struct BusLink<U, P> {
    uart: U,
    driver_enable: P,
}

impl<U, P, E> BusLink<U, P>
where
    U: UartTx<Error = E> + UartRx<Error = E>,
    P: OutputPin,
{
    /// Take ownership of the UART and driver-enable pin
    ///
    /// The pin is driven low so this node starts out listening.
    pub fn new(uart: U, mut driver_enable: P) -> Self {
        driver_enable.set_low();
        Self {
            uart,
            driver_enable,
        }
    }

    /// Give back the UART and pin
    pub fn release(self) -> (U, P) {
        (self.uart, self.driver_enable)
    }

    /// Transmit one frame
    ///
    /// The driver is enabled only for the duration of the write and is
    /// released again even if the UART fails.
    pub fn send<F: WireFrame>(&mut self, frame: &F) -> Result<(), LinkError<E>> {
        let mut buf = [0u8; MAX_FRAME_LEN];
        let len = frame.write_frame(&mut buf)?;

        self.driver_enable.set_high();
        let result = self
            .uart
            .write_blocking(&buf[..len])
            .and_then(|()| self.uart.flush());
        self.driver_enable.set_low();

        match result {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("TX: {} byte frame", len);
                Ok(())
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("UART write failed, {} byte frame dropped", len);
                Err(LinkError::Uart(e))
            }
        }
    }

    /// Receive exactly one frame of shape `F`
    ///
    /// Blocks in the UART until `F::LEN` bytes have arrived. The frame is
    /// returned only if its checksum verifies. A read that returns no bytes
    /// ends the frame early and is reported as a framing error.
    pub fn receive<F: WireFrame>(&mut self) -> Result<F, LinkError<E>> {
        let mut buf = [0u8; MAX_FRAME_LEN];
        let frame = buf
            .get_mut(..F::LEN)
            .ok_or(LinkError::Frame(FrameError::BufferTooSmall))?;

        let mut filled = 0;
        while filled < frame.len() {
            let n = self
                .uart
                .read_blocking(&mut frame[filled..])
                .map_err(LinkError::Uart)?;
            if n == 0 {
                #[cfg(feature = "defmt")]
                defmt::warn!("RX: line idle after {} of {} bytes", filled, F::LEN);
                return Err(LinkError::Frame(FrameError::Framing {
                    expected: F::LEN,
                    actual: filled,
                }));
            }
            filled += n;
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("RX: {} bytes", filled);

        F::read_frame(frame).map_err(|e| {
            #[cfg(feature = "defmt")]
            defmt::warn!("Dropping received frame: {:?}", e);
            LinkError::Frame(e)
        })
    }
}
