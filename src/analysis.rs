//! This module relates each language's blue/green category to the UV-B incidence at its field site,
//! and asks how well that single number predicts the category. Two simple classifiers are
//! provided, both implementing [`Classifier`]:
//!
//! - [`MedianClassifier`] assigns each language to whichever category's median UV-B is closer,
//!   leaving the language itself out of its own category's median.
//! - [`ExemplarClassifier`] assigns each language to whichever category it is more similar to on
//!   average, with similarity falling off as a Gaussian of UV-B distance.
//!
//! Whenever the two categories score the same, the language is predicted [`Category::Distinct`].

use crate::grid::GridCell;
use crate::sites::{Category, SurveySite};
use crate::uv::UvClimatology;

/// A language joined with the UV-B value of the grid cell its site falls in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// The WCS language number.
    pub language: u32,
    /// Whether blue and green are distinct.
    pub category: Category,
    /// The UV-B grid cell of the field site.
    pub cell: GridCell,
    /// Mean UV-B incidence in that cell.
    pub uv: f64,
}

/// Snaps every site to the UV-B grid and reads off its mean incidence.
pub fn observations(sites: &[SurveySite], climatology: &UvClimatology) -> Vec<Observation> {
    sites
        .iter()
        .map(|site| {
            let cell = climatology.grid().snap(site.location);
            Observation {
                language: site.language,
                category: site.category,
                cell,
                uv: climatology.at(cell).unwrap_or(0.0),
            }
        })
        .collect()
}

/// The median of some values: the middle one, or the mean of the middle two for an even count.
/// `None` if there are no values. NaNs sort after everything else.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or_else(|| a.is_nan().cmp(&b.is_nan())));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Summary statistics for the UV-B values of one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategorySummary {
    /// The category summarized.
    pub category: Category,
    /// How many languages are in it.
    pub count: usize,
    /// Their mean UV-B, if there are any.
    pub mean: Option<f64>,
    /// Their median UV-B, if there are any.
    pub median: Option<f64>,
}

/// Summarizes both categories, `Merged` first.
pub fn summarize(observations: &[Observation]) -> [CategorySummary; 2] {
    let summary = |category: Category| {
        let values = values_in(observations, category, None);
        CategorySummary {
            category,
            count: values.len(),
            mean: if values.is_empty() {
                None
            } else {
                Some(values.iter().sum::<f64>() / values.len() as f64)
            },
            median: median(&values),
        }
    };
    [summary(Category::Merged), summary(Category::Distinct)]
}

// The UV values in a category, optionally leaving out one observation by index.
fn values_in(observations: &[Observation], category: Category, skip: Option<usize>) -> Vec<f64> {
    observations
        .iter()
        .enumerate()
        .filter(|&(i, o)| o.category == category && Some(i) != skip)
        .map(|(_, o)| o.uv)
        .collect()
}

/// One classified language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    /// The WCS language number.
    pub language: u32,
    /// Its true category.
    pub actual: Category,
    /// What the classifier said.
    pub predicted: Category,
}

impl Prediction {
    /// Whether the classifier got it right.
    pub fn is_correct(&self) -> bool {
        self.actual == self.predicted
    }
}

/// The outcome of running a classifier over a set of observations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Evaluation {
    /// One prediction per language the classifier could decide on, in input order.
    pub predictions: Vec<Prediction>,
}

impl Evaluation {
    /// The number of correct predictions.
    pub fn correct(&self) -> usize {
        self.predictions.iter().filter(|p| p.is_correct()).count()
    }

    /// The number of predictions made.
    pub fn total(&self) -> usize {
        self.predictions.len()
    }

    /// The fraction of predictions that were correct, or `None` if none were made.
    pub fn accuracy(&self) -> Option<f64> {
        if self.predictions.is_empty() {
            None
        } else {
            Some(self.correct() as f64 / self.total() as f64)
        }
    }
}

/// Something that predicts each observation's category from the others. Observations that can't
/// be decided (say, because a category has no other members) are left out of the evaluation.
pub trait Classifier {
    /// A short name for reports.
    fn name(&self) -> &'static str;
    /// Predicts a category for every observation it can.
    fn evaluate(&self, observations: &[Observation]) -> Evaluation;
}

/// Leave-one-out nearest-median classification.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MedianClassifier;

impl Classifier for MedianClassifier {
    fn name(&self) -> &'static str {
        "median distance"
    }

    fn evaluate(&self, observations: &[Observation]) -> Evaluation {
        let mut predictions = Vec::with_capacity(observations.len());
        for (i, obs) in observations.iter().enumerate() {
            let median_of = |category: Category| {
                let skip = if category == obs.category { Some(i) } else { None };
                median(&values_in(observations, category, skip))
            };
            let (merged, distinct) = match (median_of(Category::Merged), median_of(Category::Distinct)) {
                (Some(m), Some(d)) => (m, d),
                _ => continue,
            };
            let predicted = if (merged - obs.uv).abs() < (distinct - obs.uv).abs() {
                Category::Merged
            } else {
                Category::Distinct
            };
            predictions.push(Prediction {
                language: obs.language,
                actual: obs.category,
                predicted,
            });
        }
        Evaluation { predictions }
    }
}

/// Exemplar-similarity classification: the mean of `exp(-(d / scale)^2)` over every member of a
/// category, where `d` is the UV-B distance. Languages are compared against all members,
/// themselves included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExemplarClassifier {
    /// Distance at which similarity has fallen to `1/e`. Must be positive.
    pub scale: f64,
}

impl Default for ExemplarClassifier {
    fn default() -> ExemplarClassifier {
        ExemplarClassifier { scale: 1.0 }
    }
}

impl ExemplarClassifier {
    /// Mean similarity of `uv` to a set of exemplars, or `None` if there are none.
    pub fn similarity(&self, uv: f64, exemplars: &[f64]) -> Option<f64> {
        if exemplars.is_empty() {
            return None;
        }
        let total: f64 = exemplars
            .iter()
            .map(|e| (-((e - uv) / self.scale).powi(2)).exp())
            .sum();
        Some(total / exemplars.len() as f64)
    }
}

impl Classifier for ExemplarClassifier {
    fn name(&self) -> &'static str {
        "exemplar similarity"
    }

    fn evaluate(&self, observations: &[Observation]) -> Evaluation {
        let merged = values_in(observations, Category::Merged, None);
        let distinct = values_in(observations, Category::Distinct, None);
        let predictions = observations
            .iter()
            .filter_map(|obs| {
                let m = self.similarity(obs.uv, &merged)?;
                let d = self.similarity(obs.uv, &distinct)?;
                Some(Prediction {
                    language: obs.language,
                    actual: obs.category,
                    predicted: if m > d {
                        Category::Merged
                    } else {
                        Category::Distinct
                    },
                })
            })
            .collect();
        Evaluation { predictions }
    }
}
