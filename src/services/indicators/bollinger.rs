//! Bollinger Bands.

use crate::error::Result;
use crate::types::IndicatorSeries;

use super::{check_period, sma::sma};

/// Upper, middle and lower band series.
#[derive(Debug, Clone)]
pub struct BollingerOutput {
    pub upper: IndicatorSeries,
    pub middle: IndicatorSeries,
    pub lower: IndicatorSeries,
}

/// Middle band = SMA; bands sit `std_dev` population standard deviations
/// above and below over the same trailing window. Undefined wherever the
/// middle band is.
pub fn bollinger_bands(prices: &[f64], period: usize, std_dev: f64) -> Result<BollingerOutput> {
    check_period(period)?;

    let middle = sma(prices, period)?;
    let mut upper: IndicatorSeries = vec![None; prices.len()];
    let mut lower: IndicatorSeries = vec![None; prices.len()];

    for i in 0..prices.len() {
        if let Some(mean) = middle[i] {
            let window = &prices[i + 1 - period..=i];
            let variance =
                window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / period as f64;
            let std = variance.sqrt();
            upper[i] = Some(mean + std_dev * std);
            lower[i] = Some(mean - std_dev * std);
        }
    }

    Ok(BollingerOutput {
        upper,
        middle,
        lower,
    })
}
