use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

// Normalized 0-100 scores for the four Lighthouse categories
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub performance: u8,
    pub accessibility: u8,
    pub best_practices: u8,
    pub seo: u8,
}

impl CategoryScores {
    pub fn sum(&self) -> u32 {
        [self.performance, self.accessibility, self.best_practices, self.seo]
            .iter()
            .map(|&s| s as u32)
            .sum()
    }

    pub fn mean(&self) -> f64 {
        self.sum() as f64 / 4.0
    }

    pub fn is_empty(&self) -> bool {
        self.sum() == 0
    }
}

// Root of the PageSpeed Insights payload. Every level is optional.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagespeedResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub lighthouse_result: Option<LighthouseResult>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct LighthouseResult {
    #[serde(default, deserialize_with = "lenient")]
    pub categories: Option<Categories>,
}

// pub struct for Lighthouse categories
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Categories {
    #[serde(default, deserialize_with = "lenient")]
    pub performance: Option<Category>,
    #[serde(default, deserialize_with = "lenient")]
    pub accessibility: Option<Category>,
    #[serde(default, rename = "best-practices", deserialize_with = "lenient")]
    pub best_practices: Option<Category>,
    #[serde(default, deserialize_with = "lenient")]
    pub seo: Option<Category>,
}

// pub struct for each category score
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Category {
    #[serde(default, deserialize_with = "lenient_score")]
    pub score: Option<f64>,
}

/// Accepts any JSON value for `score`; anything that is not a number reads as absent.
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

/// A nested object of the wrong shape reads as absent instead of failing the whole payload.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl Category {
    /// Scales a [0,1] score to an integer percentage. Missing scores count as 0.
    pub fn percent(category: Option<&Category>) -> u8 {
        category
            .and_then(|c| c.score)
            .map(|s| (s * 100.0).round().clamp(0.0, 100.0) as u8)
            .unwrap_or(0)
    }
}

impl PagespeedResponse {
    pub fn category_scores(&self) -> CategoryScores {
        let categories = self
            .lighthouse_result
            .as_ref()
            .and_then(|r| r.categories.as_ref());

        match categories {
            Some(c) => CategoryScores {
                performance: Category::percent(c.performance.as_ref()),
                accessibility: Category::percent(c.accessibility.as_ref()),
                best_practices: Category::percent(c.best_practices.as_ref()),
                seo: Category::percent(c.seo.as_ref()),
            },
            None => CategoryScores::default(),
        }
    }
}
