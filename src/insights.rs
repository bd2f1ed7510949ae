//! Advisory text for the dashboard, fetched from a pluggable provider
//! with canned fallback copy.
//!
//! Whether an insight came from the provider or from the fallback catalog
//! is carried explicitly on the result rather than inferred from the text.

use thiserror::Error;
use tracing::warn;

/// Advisory topics the dashboard can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightTopic {
    MarketTrends,
    GenerationForecast,
    TradingStrategy,
    PricePrediction,
    SustainabilityImpact,
}

impl InsightTopic {
    pub const ALL: [InsightTopic; 5] = [
        InsightTopic::MarketTrends,
        InsightTopic::GenerationForecast,
        InsightTopic::TradingStrategy,
        InsightTopic::PricePrediction,
        InsightTopic::SustainabilityImpact,
    ];

    pub fn title(self) -> &'static str {
        match self {
            InsightTopic::MarketTrends => "Market Trends",
            InsightTopic::GenerationForecast => "Generation Forecast",
            InsightTopic::TradingStrategy => "Trading Strategy",
            InsightTopic::PricePrediction => "Price Prediction",
            InsightTopic::SustainabilityImpact => "Sustainability Impact",
        }
    }

    /// Canned markdown shown when the provider is unavailable.
    pub fn fallback_text(self) -> &'static str {
        match self {
            InsightTopic::MarketTrends => MARKET_TRENDS_FALLBACK,
            InsightTopic::GenerationForecast => GENERATION_FORECAST_FALLBACK,
            InsightTopic::TradingStrategy => TRADING_STRATEGY_FALLBACK,
            InsightTopic::PricePrediction => PRICE_PREDICTION_FALLBACK,
            InsightTopic::SustainabilityImpact => SUSTAINABILITY_FALLBACK,
        }
    }
}

/// Where an insight's body came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightOrigin {
    /// Generated by the configured provider.
    Provider,
    /// Canned copy substituted after a provider failure.
    Fallback,
}

/// An advisory text with its provenance.
#[derive(Debug, Clone)]
pub struct Insight {
    pub topic: InsightTopic,
    pub body: String,
    pub origin: InsightOrigin,
}

#[derive(Debug, Error)]
pub enum InsightsError {
    #[error("insights provider unavailable: {0}")]
    Unavailable(String),
}

/// Generates advisory text for a topic given freeform market context.
pub trait InsightsProvider {
    fn generate(&mut self, topic: InsightTopic, context: &str) -> Result<String, InsightsError>;
}

/// Provider used when no generative backend is configured; always defers
/// to the fallback catalog.
pub struct OfflineInsights;

impl InsightsProvider for OfflineInsights {
    fn generate(&mut self, _topic: InsightTopic, _context: &str) -> Result<String, InsightsError> {
        Err(InsightsError::Unavailable("offline".to_string()))
    }
}

/// Fetches an insight, degrading to the canned catalog on provider failure.
///
/// The returned origin says which path produced the body, so callers never
/// have to sniff the text to tell live output from the fallback.
pub fn fetch_insight(
    provider: &mut dyn InsightsProvider,
    topic: InsightTopic,
    context: &str,
) -> Insight {
    match provider.generate(topic, context) {
        Ok(body) => Insight {
            topic,
            body,
            origin: InsightOrigin::Provider,
        },
        Err(e) => {
            warn!(topic = topic.title(), error = %e, "insights provider failed, using fallback");
            Insight {
                topic,
                body: topic.fallback_text().to_string(),
                origin: InsightOrigin::Fallback,
            }
        }
    }
}

const MARKET_TRENDS_FALLBACK: &str = "\
## Market Trend Analysis
The energy market is currently showing stable trends with moderate volatility. \
Solar energy prices are expected to remain steady due to consistent weather patterns.

## Price Impact of Current Weather
Current weather conditions are favorable for renewable energy generation, which \
may lead to slightly lower prices in the short term.

## Trading Recommendations
- Consider buying during off-peak hours when prices are typically lower
- Monitor weather forecasts for potential price fluctuations
- Diversify your energy portfolio to mitigate risks

## Risk Factors to Consider
- Sudden weather changes could impact generation capacity
- Grid stability issues may affect pricing
- Regulatory changes could impact market dynamics";

const GENERATION_FORECAST_FALLBACK: &str = "\
## Expected Generation Capacity
Based on current weather conditions, generation capacity is expected to be at \
75-80% of maximum capacity.

## Peak Generation Times
Peak generation is expected between 11:00 AM and 3:00 PM when solar irradiance \
is highest.

## Potential Challenges
- Cloud cover may reduce efficiency by 10-15%
- Wind speeds are below optimal levels for wind generation
- High temperatures may slightly reduce solar panel efficiency

## Optimization Suggestions
- Consider adjusting panel angles for optimal sun exposure
- Implement energy storage solutions for peak demand periods
- Schedule maintenance during low-generation periods";

const TRADING_STRATEGY_FALLBACK: &str = "\
## Optimal Trading Times
Best times to trade are between 10:00 AM and 2:00 PM when market liquidity is \
highest.

## Price Targets
- Buy target: $3.80-4.00 per kWh
- Sell target: $4.20-4.40 per kWh

## Risk Management Strategies
- Set stop-loss orders at 5% below entry price
- Diversify across multiple energy sources
- Monitor weather forecasts for sudden changes

## Alternative Options to Consider
- Consider long-term contracts for price stability
- Explore peer-to-peer energy trading platforms
- Investigate demand response programs";

const PRICE_PREDICTION_FALLBACK: &str = "\
## Price Trend Prediction
Prices are expected to remain stable with a slight upward trend over the next \
24 hours.

## Expected Price Range
- Minimum: $3.75 per kWh
- Maximum: $4.25 per kWh

## Key Factors Influencing the Prediction
- Stable weather conditions expected
- Moderate demand forecast
- Grid stability reports positive

## Confidence Level in the Prediction
75% confidence in the predicted price range";

const SUSTAINABILITY_FALLBACK: &str = "\
## Carbon Footprint Reduction
This transaction will reduce carbon emissions by approximately 2.5 metric tons \
of CO2.

## Environmental Benefits
- Reduced reliance on fossil fuel-based power plants
- Lower air pollution in the local area
- Conservation of water resources

## Sustainability Metrics
- Renewable energy percentage: 100%
- Energy efficiency rating: A+
- Environmental impact score: 95/100

## Comparison to Traditional Energy Sources
This renewable energy source produces 98% less CO2 compared to coal-fired power \
plants and 95% less compared to natural gas plants.";
