//! Aggregated dashboard data from cleaned records.
//!
//! Produces the JSON artifact the static dashboard renders: one overall
//! summary block plus group-by tables per campaign type, channel, customer
//! segment, location, (month, channel) pair, and duration category. Group
//! keys are sorted so output is deterministic.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::clean::as_number;

// =============================================================================
// Output Types
// =============================================================================

/// Top-level dashboard artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub summary: DashboardSummary,
    pub campaign_types: Vec<TypeMetrics>,
    pub channel_performance: Vec<ChannelMetrics>,
    pub segment_performance: Vec<SegmentMetrics>,
    pub geographic_data: Vec<LocationMetrics>,
    pub monthly_trends: Vec<MonthlyTrend>,
    pub duration_metrics: Vec<DurationBucketMetrics>,
}

/// Whole-dataset roll-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub avg_conversion_rate: f64,
    pub avg_roi: f64,
    pub total_acquisition_cost: f64,
    pub total_clicks: f64,
    pub total_impressions: f64,
    pub total_campaigns: usize,
    pub avg_engagement_score: f64,
}

/// Per campaign type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeMetrics {
    pub campaign_type: String,
    pub avg_conversion_rate: f64,
    pub avg_roi: f64,
    pub avg_acquisition_cost: f64,
    pub campaigns: usize,
    pub avg_engagement_score: f64,
}

/// Per channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelMetrics {
    pub channel: String,
    pub total_impressions: f64,
    pub total_clicks: f64,
    pub avg_conversion_rate: f64,
    pub avg_roi: f64,
    pub avg_engagement_score: f64,
}

/// Per customer segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentMetrics {
    pub segment: String,
    pub avg_conversion_rate: f64,
    pub avg_roi: f64,
    pub avg_engagement_score: f64,
    pub total_acquisition_cost: f64,
}

/// Per location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationMetrics {
    pub location: String,
    pub avg_conversion_rate: f64,
    pub avg_roi: f64,
    pub campaigns: usize,
    pub avg_engagement_score: f64,
}

/// Per (month, channel) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyTrend {
    pub month: u32,
    pub channel: String,
    pub avg_roi: f64,
    pub avg_conversion_rate: f64,
    pub avg_engagement_score: f64,
}

/// Per duration category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationBucketMetrics {
    pub duration_category: String,
    pub avg_roi: f64,
    pub avg_engagement_score: f64,
    pub avg_conversion_rate: f64,
    pub campaigns: usize,
}

// =============================================================================
// Accumulation
// =============================================================================

/// Running sums for one group.
#[derive(Debug, Default, Clone)]
struct Acc {
    count: usize,
    conversion_rate: f64,
    roi: f64,
    engagement_score: f64,
    acquisition_cost: f64,
    clicks: f64,
    impressions: f64,
}

impl Acc {
    fn add(&mut self, record: &Value) {
        self.count += 1;
        self.conversion_rate += metric(record, "Conversion_Rate");
        self.roi += metric(record, "ROI");
        self.engagement_score += metric(record, "Engagement_Score");
        self.acquisition_cost += metric(record, "Acquisition_Cost");
        self.clicks += metric(record, "Clicks");
        self.impressions += metric(record, "Impressions");
    }

    fn mean(&self, sum: f64) -> f64 {
        if self.count > 0 {
            sum / self.count as f64
        } else {
            0.0
        }
    }
}

fn metric(record: &Value, column: &str) -> f64 {
    record.get(column).and_then(as_number).unwrap_or(0.0)
}

fn label(record: &Value, column: &str) -> String {
    record
        .get(column)
        .and_then(|v| v.as_str())
        .unwrap_or("Unknown")
        .to_string()
}

fn group_by<'a, K: Ord>(
    records: &'a [Value],
    key: impl Fn(&'a Value) -> K,
) -> BTreeMap<K, Acc> {
    let mut groups: BTreeMap<K, Acc> = BTreeMap::new();
    for record in records {
        groups.entry(key(record)).or_default().add(record);
    }
    groups
}

// =============================================================================
// Builder
// =============================================================================

/// Build the dashboard artifact from cleaned records.
pub fn build_dashboard_data(records: &[Value]) -> DashboardData {
    let mut overall = Acc::default();
    for record in records {
        overall.add(record);
    }

    let summary = DashboardSummary {
        avg_conversion_rate: overall.mean(overall.conversion_rate),
        avg_roi: overall.mean(overall.roi),
        total_acquisition_cost: overall.acquisition_cost,
        total_clicks: overall.clicks,
        total_impressions: overall.impressions,
        total_campaigns: overall.count,
        avg_engagement_score: overall.mean(overall.engagement_score),
    };

    let campaign_types = group_by(records, |r| label(r, "Campaign_Type"))
        .into_iter()
        .map(|(campaign_type, acc)| TypeMetrics {
            campaign_type,
            avg_conversion_rate: acc.mean(acc.conversion_rate),
            avg_roi: acc.mean(acc.roi),
            avg_acquisition_cost: acc.mean(acc.acquisition_cost),
            campaigns: acc.count,
            avg_engagement_score: acc.mean(acc.engagement_score),
        })
        .collect();

    let channel_performance = group_by(records, |r| label(r, "Channel_Used"))
        .into_iter()
        .map(|(channel, acc)| ChannelMetrics {
            channel,
            total_impressions: acc.impressions,
            total_clicks: acc.clicks,
            avg_conversion_rate: acc.mean(acc.conversion_rate),
            avg_roi: acc.mean(acc.roi),
            avg_engagement_score: acc.mean(acc.engagement_score),
        })
        .collect();

    let segment_performance = group_by(records, |r| label(r, "Customer_Segment"))
        .into_iter()
        .map(|(segment, acc)| SegmentMetrics {
            segment,
            avg_conversion_rate: acc.mean(acc.conversion_rate),
            avg_roi: acc.mean(acc.roi),
            avg_engagement_score: acc.mean(acc.engagement_score),
            total_acquisition_cost: acc.acquisition_cost,
        })
        .collect();

    let geographic_data = group_by(records, |r| label(r, "Location"))
        .into_iter()
        .map(|(location, acc)| LocationMetrics {
            location,
            avg_conversion_rate: acc.mean(acc.conversion_rate),
            avg_roi: acc.mean(acc.roi),
            campaigns: acc.count,
            avg_engagement_score: acc.mean(acc.engagement_score),
        })
        .collect();

    let monthly_trends = group_by(records, |r| {
        (metric(r, "Month") as u32, label(r, "Channel_Used"))
    })
    .into_iter()
    .map(|((month, channel), acc)| MonthlyTrend {
        month,
        channel,
        avg_roi: acc.mean(acc.roi),
        avg_conversion_rate: acc.mean(acc.conversion_rate),
        avg_engagement_score: acc.mean(acc.engagement_score),
    })
    .collect();

    let duration_metrics = group_by(records, |r| label(r, "Duration_Category"))
        .into_iter()
        .map(|(duration_category, acc)| DurationBucketMetrics {
            duration_category,
            avg_roi: acc.mean(acc.roi),
            avg_engagement_score: acc.mean(acc.engagement_score),
            avg_conversion_rate: acc.mean(acc.conversion_rate),
            campaigns: acc.count,
        })
        .collect();

    DashboardData {
        summary,
        campaign_types,
        channel_performance,
        segment_performance,
        geographic_data,
        monthly_trends,
        duration_metrics,
    }
}
