use std::collections::HashMap;

use num_traits::Float;

use crate::error::UpgmaError;

/// Orders a pair of node ids so it can be used as a key into the distance
/// table. The table holds exactly one entry per unordered pair.
pub(crate) fn pair_index(i: usize, j: usize) -> (usize, usize) {
    if i < j {
        (i, j)
    } else {
        (j, i)
    }
}

/// A symmetric table of pairwise distances over a set of labeled leaves.
///
/// Leaves are indexed in the order they are first mentioned; distances are
/// stored once per unordered pair, so symmetry holds by construction.
#[derive(Debug, Clone)]
pub struct DistanceMatrix<T> {
    pub(crate) labels: Vec<String>,
    pub(crate) distances: HashMap<(usize, usize), T>,
}

impl<T: Float> DistanceMatrix<T> {
    /// Builds a distance matrix from (label, label, distance) triples. The
    /// leaf set is the union of all labels mentioned.
    ///
    /// # Errors
    /// * `DuplicatePair` if a pair appears twice (in either orientation) or a
    ///   label is paired with itself.
    /// * `NoLeaves` if no triples are supplied.
    pub fn from_pairs<I>(records: I) -> Result<Self, UpgmaError>
    where
        I: IntoIterator<Item = (String, String, T)>,
    {
        let mut labels: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut distances: HashMap<(usize, usize), T> = HashMap::new();

        fn intern(label: String, labels: &mut Vec<String>, index: &mut HashMap<String, usize>) -> usize {
            match index.get(&label) {
                Some(&i) => i,
                None => {
                    let i = labels.len();
                    index.insert(label.clone(), i);
                    labels.push(label);
                    i
                }
            }
        }

        for (label_a, label_b, distance) in records {
            if label_a == label_b {
                return Err(UpgmaError::DuplicatePair(format!(
                    "`{label_a}` is paired with itself"
                )));
            }
            let i = intern(label_a, &mut labels, &mut index);
            let j = intern(label_b, &mut labels, &mut index);
            if distances.insert(pair_index(i, j), distance).is_some() {
                return Err(UpgmaError::DuplicatePair(format!(
                    "the pair `{}`, `{}` appears more than once",
                    labels[i.min(j)],
                    labels[i.max(j)]
                )));
            }
        }

        if labels.is_empty() {
            return Err(UpgmaError::NoLeaves);
        }
        Ok(DistanceMatrix { labels, distances })
    }

    /// A matrix over a single leaf with no pairwise entries. The line-based
    /// file format cannot express this case, but the clustering engine
    /// accepts it and yields a leaf-only tree.
    pub fn single(label: impl Into<String>) -> Self {
        DistanceMatrix {
            labels: vec![label.into()],
            distances: HashMap::new(),
        }
    }

    /// The number of leaves (original taxa) in the matrix.
    pub fn n_leaves(&self) -> usize {
        self.labels.len()
    }

    /// The leaf labels, in first-mentioned order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The recorded distance between two leaves, by label. Symmetric in its
    /// arguments; `None` for unknown labels or an unrecorded pair.
    pub fn distance(&self, label_a: &str, label_b: &str) -> Option<T> {
        let i = self.labels.iter().position(|l| l == label_a)?;
        let j = self.labels.iter().position(|l| l == label_b)?;
        self.distances.get(&pair_index(i, j)).copied()
    }
}

impl DistanceMatrix<f64> {
    /// Parses the flat distance-record format, one record per line:
    ///
    /// ```text
    /// <label_a> <label_b> <distance>
    /// ```
    ///
    /// Fields are whitespace-separated and blank lines are skipped. The
    /// distance must parse as a finite, non-negative number, and every
    /// unordered pair of distinct labels may appear at most once.
    pub fn parse(input: &str) -> Result<Self, UpgmaError> {
        let mut records = Vec::new();
        for (line_no, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 3 {
                return Err(UpgmaError::MalformedRecord(format!(
                    "line {}: expected `<label_a> <label_b> <distance>`, got `{line}`",
                    line_no + 1
                )));
            }
            let distance = fields[2].parse::<f64>().map_err(|_| {
                UpgmaError::MalformedRecord(format!(
                    "line {}: `{}` is not a number",
                    line_no + 1,
                    fields[2]
                ))
            })?;
            if !distance.is_finite() || distance < 0.0 {
                return Err(UpgmaError::InvalidDistance(format!(
                    "line {}: `{}` must be a finite, non-negative number",
                    line_no + 1,
                    fields[2]
                )));
            }
            records.push((fields[0].to_string(), fields[1].to_string(), distance));
        }
        DistanceMatrix::from_pairs(records)
    }
}
