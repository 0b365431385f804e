//! Coordinate scales for the chart axes.

/// Maps ordinal band indices onto a pixel range with uniform padding on
/// both sides of every band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    range_start: f64,
    range_end: f64,
    count: usize,
    padding: f64,
}

impl BandScale {
    pub fn new(range_start: f64, range_end: f64, count: usize, padding: f64) -> Self {
        BandScale {
            range_start,
            range_end,
            count,
            padding,
        }
    }

    /// Distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        let n = self.count.max(1) as f64;
        (self.range_end - self.range_start) / (n + self.padding)
    }

    /// Width of one band.
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    /// Left edge of band `index`.
    pub fn position(&self, index: usize) -> f64 {
        self.range_start + self.step() * (self.padding + index as f64)
    }

    /// Horizontal center of band `index`, for axis labels.
    pub fn center(&self, index: usize) -> f64 {
        self.position(index) + self.bandwidth() / 2.0
    }
}

/// Maps `[0, domain_max]` linearly onto a pixel range. The range may be
/// inverted, which is how the vertical axis puts zero at the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_max: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain_max: f64, range_start: f64, range_end: f64) -> Self {
        LinearScale {
            domain_max,
            range_start,
            range_end,
        }
    }

    pub fn scale(&self, value: f64) -> f64 {
        if self.domain_max == 0.0 {
            return self.range_start;
        }
        self.range_start + (value / self.domain_max) * (self.range_end - self.range_start)
    }

    /// Tick values at a round interval (1, 2 or 5 times a power of ten)
    /// chosen to land near `target` ticks, always including 0 and never
    /// exceeding the domain max.
    pub fn ticks(&self, target: usize) -> Vec<f64> {
        if self.domain_max <= 0.0 || target == 0 {
            return vec![0.0];
        }
        let raw_step = self.domain_max / target as f64;
        let magnitude = 10f64.powf(raw_step.log10().floor());
        let residual = raw_step / magnitude;
        let nice = if residual <= 1.0 {
            1.0
        } else if residual <= 2.0 {
            2.0
        } else if residual <= 5.0 {
            5.0
        } else {
            10.0
        };
        let step = nice * magnitude;

        let mut ticks = Vec::new();
        let mut i = 0u32;
        loop {
            let value = f64::from(i) * step;
            if value > self.domain_max * (1.0 + 1e-9) {
                break;
            }
            ticks.push(value);
            i += 1;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn band_positions_cover_range_with_padding() {
        let scale = BandScale::new(0.0, 110.0, 10, 0.1);
        assert!(close(scale.step(), 110.0 / 10.1));
        assert!(close(scale.bandwidth(), scale.step() * 0.9));
        assert!(close(scale.position(0), scale.step() * 0.1));
        // Last band's right edge stays inside the range.
        let right = scale.position(9) + scale.bandwidth();
        assert!(right <= 110.0);
    }

    #[test]
    fn band_center_is_midpoint() {
        let scale = BandScale::new(0.0, 100.0, 4, 0.1);
        assert!(close(
            scale.center(2),
            scale.position(2) + scale.bandwidth() / 2.0
        ));
    }

    #[test]
    fn linear_scale_maps_endpoints() {
        // Inverted range, as used for the vertical axis.
        let scale = LinearScale::new(1.0, 540.0, 0.0);
        assert!(close(scale.scale(0.0), 540.0));
        assert!(close(scale.scale(1.0), 0.0));
        assert!(close(scale.scale(0.5), 270.0));
    }

    #[test]
    fn zero_domain_pins_to_range_start() {
        let scale = LinearScale::new(0.0, 540.0, 0.0);
        assert!(close(scale.scale(0.0), 540.0));
        assert_eq!(scale.ticks(10), vec![0.0]);
    }

    #[test]
    fn ticks_use_round_steps() {
        let unit = LinearScale::new(1.0, 540.0, 0.0);
        let ticks = unit.ticks(10);
        assert_eq!(ticks.first().copied(), Some(0.0));
        assert_eq!(ticks.last().copied(), Some(1.0));
        assert_eq!(ticks.len(), 11);

        let counts = LinearScale::new(37.0, 540.0, 0.0);
        let ticks = counts.ticks(10);
        assert!(close(ticks[1] - ticks[0], 5.0));
        assert!(*ticks.last().unwrap() <= 37.0);
    }
}
