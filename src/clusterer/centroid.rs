use crate::features::FeatureVector;

/// Componentwise mean of the given vectors
///
/// Each term's weights are summed across members, then every accumulated
/// weight is divided by the member count. Returns `None` for no members.
pub fn compute_centroid<'a>(
    vectors: impl IntoIterator<Item = &'a FeatureVector>,
) -> Option<FeatureVector> {
    let mut out = FeatureVector::new();
    let mut n = 0usize;

    for v in vectors {
        for (term, weight) in v.iter() {
            out.accumulate(term, weight);
        }
        n += 1;
    }

    if n == 0 {
        return None;
    }

    out.scale_down(n as f64);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fv(entries: &[(&str, f64)]) -> FeatureVector {
        entries.iter().map(|&(t, w)| (t, w)).collect()
    }

    #[test]
    fn test_single_member_is_identity() {
        let v = fv(&[("a", 0.25), ("b", 3.0)]);
        assert_eq!(compute_centroid([&v]), Some(v.clone()));
    }

    #[test]
    fn test_mean_of_disjoint_terms() {
        let a = fv(&[("a", 1.0)]);
        let b = fv(&[("b", 2.0)]);
        let c = compute_centroid([&a, &b]).unwrap();

        assert_eq!(c.get("a"), 0.5);
        assert_eq!(c.get("b"), 1.0);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_no_members() {
        assert_eq!(compute_centroid(std::iter::empty::<&FeatureVector>()), None);
    }
}
