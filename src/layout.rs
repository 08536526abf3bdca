//! Physical arrangement of the LED panels.
//!
//! The lamp is a ring of identical panels. Each panel is a small matrix
//! wired row by row, so the LED index alone does not tell where around the
//! ring a pixel sits. Effects that rotate work in ring columns instead.

/// Geometry of the panel ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    /// Number of LEDs on one panel
    pub leds_per_panel: u8,
    /// Number of columns on one panel
    pub columns_per_panel: u8,
}

impl PanelLayout {
    /// Four-by-four panels
    pub const DEFAULT: Self = Self {
        leds_per_panel: 16,
        columns_per_panel: 4,
    };

    /// Ring column of the LED at `index`
    pub const fn column_of(self, index: usize) -> usize {
        if self.leds_per_panel == 0 || self.columns_per_panel == 0 {
            return 0;
        }
        let panel = index / self.leds_per_panel as usize;
        let local = index % self.columns_per_panel as usize;
        panel * self.columns_per_panel as usize + local
    }

    /// Number of columns around the ring for a strip of `led_count` LEDs
    ///
    /// Never 0, so it is always safe to use as a modulus.
    pub const fn ring_columns(self, led_count: usize) -> usize {
        if self.leds_per_panel == 0 {
            return 1;
        }
        let panels = led_count.div_ceil(self.leds_per_panel as usize);
        let columns = panels * self.columns_per_panel as usize;
        if columns == 0 { 1 } else { columns }
    }
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}
