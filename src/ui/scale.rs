/// Symmetric-log axis transform: linear within `±linthresh`, logarithmic
/// beyond it, continuous at the threshold.
///
/// The plot works in transformed coordinates; axis labels map grid marks back
/// through [`SymLog::inverse`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymLog {
    base: f64,
    linthresh: f64,
    linscale_adj: f64,
}

impl Default for SymLog {
    fn default() -> Self {
        Self::new(10.0, 2.0, 1.0)
    }
}

impl SymLog {
    pub fn new(base: f64, linthresh: f64, linscale: f64) -> Self {
        Self {
            base,
            linthresh,
            linscale_adj: linscale / (1.0 - base.recip()),
        }
    }

    pub fn forward(&self, value: f64) -> f64 {
        let abs = value.abs();
        if abs <= self.linthresh {
            value * self.linscale_adj
        } else {
            value.signum()
                * self.linthresh
                * (self.linscale_adj + (abs / self.linthresh).log(self.base))
        }
    }

    pub fn inverse(&self, value: f64) -> f64 {
        let abs = value.abs();
        if abs <= self.linthresh * self.linscale_adj {
            value / self.linscale_adj
        } else {
            value.signum()
                * self.linthresh
                * self.base.powf(abs / self.linthresh - self.linscale_adj)
        }
    }
}

/// Compact axis label: 0, 10, 1k, 1M, 1G ...
pub fn format_count(value: f64) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e9 {
        (value / 1e9, "G")
    } else if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "k")
    } else {
        (value, "")
    };
    if (scaled - scaled.round()).abs() < 0.05 {
        format!("{}{suffix}", scaled.round())
    } else {
        format!("{scaled:.1}{suffix}")
    }
}
