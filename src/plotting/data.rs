//! Conversions from caller-side numeric collections into plot data.

/// Trait for types that can be converted into plot data.
pub trait IntoPlotData {
    /// Convert into a vector of f64 values.
    fn into_plot_data(self) -> Vec<f64>;
}

impl IntoPlotData for Vec<f64> {
    fn into_plot_data(self) -> Vec<f64> {
        self
    }
}

impl IntoPlotData for &Vec<f64> {
    fn into_plot_data(self) -> Vec<f64> {
        self.clone()
    }
}

impl IntoPlotData for &[f64] {
    fn into_plot_data(self) -> Vec<f64> {
        self.to_vec()
    }
}

impl<const N: usize> IntoPlotData for [f64; N] {
    fn into_plot_data(self) -> Vec<f64> {
        self.to_vec()
    }
}

impl<const N: usize> IntoPlotData for &[f64; N] {
    fn into_plot_data(self) -> Vec<f64> {
        self.to_vec()
    }
}

/// Lossless widening conversions for the other primitive numeric types.
macro_rules! widen_into_plot_data {
    ($($t:ty),*) => {
        $(
            impl IntoPlotData for Vec<$t> {
                fn into_plot_data(self) -> Vec<f64> {
                    self.into_iter().map(f64::from).collect()
                }
            }

            impl IntoPlotData for &[$t] {
                fn into_plot_data(self) -> Vec<f64> {
                    self.iter().copied().map(f64::from).collect()
                }
            }

            impl<const N: usize> IntoPlotData for [$t; N] {
                fn into_plot_data(self) -> Vec<f64> {
                    self.into_iter().map(f64::from).collect()
                }
            }
        )*
    };
}

widen_into_plot_data!(f32, i32, u32, i16, u16, u8);

/// Counts (e.g. pre-binned histogram contents) often arrive as `u64`/`usize`.
impl IntoPlotData for Vec<u64> {
    fn into_plot_data(self) -> Vec<f64> {
        self.into_iter().map(|c| c as f64).collect()
    }
}

impl IntoPlotData for Vec<usize> {
    fn into_plot_data(self) -> Vec<f64> {
        self.into_iter().map(|c| c as f64).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!([1i32, 2, 3].into_plot_data(), vec![1.0, 2.0, 3.0]);
        assert_eq!(vec![0.5f32].into_plot_data(), vec![0.5]);
        assert_eq!(vec![7usize].into_plot_data(), vec![7.0]);
    }
}
