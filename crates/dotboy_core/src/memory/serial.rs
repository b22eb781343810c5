/// Serial port capture.
///
/// Test ROMs report results by writing a byte to SB and then starting a
/// transfer on SC (bit 7 set while bit 0 selects the internal clock). We
/// record the byte and complete the transfer immediately.
#[derive(Clone, Debug, Default)]
pub(super) struct Serial {
    output: Vec<u8>,
}

impl Serial {
    /// Handle a write to SC and return the value SC holds afterwards.
    pub(super) fn write_sc(&mut self, sb: u8, value: u8) -> u8 {
        // Internal clock & start bit set?
        if (value & 0x81) == 0x81 {
            self.output.push(sb);
            // Clear transfer start bit.
            value & !0x80
        } else {
            value
        }
    }

    pub(super) fn output(&self) -> &[u8] {
        &self.output
    }

    pub(super) fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }
}
