//! Sweep ranges per trainer family.
//!
//! Each builder returns the parameters a search process may tune for that family,
//! in a fixed order. Names match the field names the corresponding options record
//! accepts in [`crate::options`].

use super::params::SweepableParam;
use super::value::ParamValue;

fn floats(values: &[f64]) -> Vec<ParamValue> {
    values.iter().copied().map(ParamValue::Float).collect()
}

fn ints(values: &[i64]) -> Vec<ParamValue> {
    values.iter().copied().map(ParamValue::Int).collect()
}

fn bools() -> Vec<ParamValue> {
    vec![ParamValue::Bool(false), ParamValue::Bool(true)]
}

fn with_auto(mut values: Vec<ParamValue>) -> Vec<ParamValue> {
    values.insert(0, ParamValue::Auto);
    values
}

fn tree_params() -> Vec<SweepableParam> {
    vec![
        SweepableParam::long("NumberOfLeaves", 2, 128, true, Some(4.0)),
        SweepableParam::discrete("MinimumExampleCountPerLeaf", ints(&[1, 10, 50])),
    ]
}

pub fn averaged_perceptron_params() -> Vec<SweepableParam> {
    vec![
        SweepableParam::discrete(
            "LossFunction",
            vec![
                "HingeLoss".into(),
                "LogLoss".into(),
                "SmoothedHingeLoss".into(),
            ],
        ),
        SweepableParam::discrete("LearningRate", floats(&[1.0, 0.1, 0.5])),
        SweepableParam::discrete("DecreaseLearningRate", bools()),
        SweepableParam::float("L2Regularization", 0.0, 0.4, false),
        SweepableParam::long("NumberOfIterations", 1, 100, true, Some(10.0)),
    ]
}

pub fn fast_forest_params() -> Vec<SweepableParam> {
    let mut params = tree_params();
    params.push(SweepableParam::discrete(
        "NumberOfTrees",
        ints(&[20, 100, 500]),
    ));
    params.push(SweepableParam::discrete(
        "FeatureFraction",
        floats(&[0.7, 0.9, 1.0]),
    ));
    params
}

pub fn fast_tree_params() -> Vec<SweepableParam> {
    let mut params = tree_params();
    params.push(SweepableParam::discrete(
        "NumberOfTrees",
        ints(&[20, 100, 500]),
    ));
    params.push(SweepableParam::float("LearningRate", 0.025, 0.4, true));
    params.push(SweepableParam::float("Shrinkage", 0.025, 4.0, true));
    params
}

pub fn light_gbm_params() -> Vec<SweepableParam> {
    vec![
        SweepableParam::discrete("NumberOfIterations", ints(&[10, 20, 50, 100, 150, 200])),
        SweepableParam::float("LearningRate", 0.025, 0.4, true),
        SweepableParam::long("NumberOfLeaves", 2, 128, true, Some(4.0)),
        SweepableParam::discrete("MinimumExampleCountPerLeaf", ints(&[1, 10, 20, 50])),
        SweepableParam::discrete("UseCategoricalSplit", bools()),
        SweepableParam::discrete("HandleMissingValue", bools()),
        SweepableParam::discrete("MinimumExampleCountPerGroup", ints(&[10, 50, 100, 200])),
        SweepableParam::discrete("MaximumCategoricalSplitPointCount", ints(&[8, 16, 32, 64])),
        SweepableParam::discrete("CategoricalSmoothing", floats(&[1.0, 10.0, 20.0])),
        SweepableParam::discrete(
            "L2CategoricalRegularization",
            floats(&[0.1, 0.5, 1.0, 5.0, 10.0]),
        ),
        SweepableParam::discrete("L1Regularization", floats(&[0.0, 0.5, 1.0])),
        SweepableParam::discrete("L2Regularization", floats(&[0.0, 0.5, 1.0])),
    ]
}

/// LightGBM ranges plus the softmax switch only the multiclass trainer has.
pub fn light_gbm_multiclass_params() -> Vec<SweepableParam> {
    let mut params = light_gbm_params();
    params.push(SweepableParam::discrete("UseSoftmax", bools()));
    params
}

pub fn linear_svm_params() -> Vec<SweepableParam> {
    vec![
        SweepableParam::float("Lambda", 0.00001, 0.1, true),
        SweepableParam::discrete("PerformProjection", bools()),
        SweepableParam::discrete("NoBias", bools()),
        SweepableParam::long("NumberOfIterations", 1, 100, true, Some(10.0)),
    ]
}

pub fn lbfgs_logistic_regression_params() -> Vec<SweepableParam> {
    vec![
        SweepableParam::discrete("OptimizationTolerance", floats(&[1e-4, 1e-7])),
        SweepableParam::discrete("HistorySize", ints(&[5, 20, 50])),
        SweepableParam::float("L1Regularization", 0.0, 1.0, false),
        SweepableParam::float("L2Regularization", 0.0, 1.0, false),
    ]
}

pub fn sdca_params() -> Vec<SweepableParam> {
    vec![
        SweepableParam::discrete(
            "L2Regularization",
            with_auto(floats(&[1e-7, 1e-6, 1e-5, 1e-4, 1e-3, 1e-2])),
        ),
        SweepableParam::discrete(
            "L1Regularization",
            with_auto(floats(&[0.0, 0.25, 0.5, 0.75, 1.0])),
        ),
        SweepableParam::discrete("ConvergenceTolerance", floats(&[0.001, 0.01, 0.1, 0.2])),
        SweepableParam::discrete(
            "MaximumNumberOfIterations",
            with_auto(ints(&[10, 20, 100])),
        ),
        SweepableParam::discrete("Shuffle", bools()),
        SweepableParam::discrete("BiasLearningRate", floats(&[0.0, 0.01, 0.1, 1.0])),
    ]
}

pub fn sgd_params() -> Vec<SweepableParam> {
    vec![
        SweepableParam::discrete(
            "L2Regularization",
            floats(&[1e-7, 5e-7, 1e-6, 5e-6, 1e-5]),
        ),
        SweepableParam::discrete("ConvergenceTolerance", floats(&[1e-2, 1e-3, 1e-4, 1e-5])),
        SweepableParam::discrete("NumberOfIterations", ints(&[1, 5, 10, 20])),
        SweepableParam::discrete("Shuffle", bools()),
    ]
}

pub fn symbolic_sgd_params() -> Vec<SweepableParam> {
    vec![
        SweepableParam::discrete("NumberOfIterations", ints(&[1, 5, 10, 20, 30, 40, 50])),
        SweepableParam::discrete(
            "LearningRate",
            with_auto(floats(&[1e1, 1e0, 1e-1, 1e-2, 1e-3])),
        ),
        SweepableParam::discrete("L2Regularization", floats(&[0.0, 1e-5, 1e-6, 1e-7])),
        SweepableParam::discrete("UpdateFrequency", with_auto(ints(&[5, 20]))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_builders() -> Vec<(&'static str, Vec<SweepableParam>)> {
        vec![
            ("averaged_perceptron", averaged_perceptron_params()),
            ("fast_forest", fast_forest_params()),
            ("fast_tree", fast_tree_params()),
            ("light_gbm", light_gbm_params()),
            ("light_gbm_multiclass", light_gbm_multiclass_params()),
            ("linear_svm", linear_svm_params()),
            ("lbfgs", lbfgs_logistic_regression_params()),
            ("sdca", sdca_params()),
            ("sgd", sgd_params()),
            ("symbolic_sgd", symbolic_sgd_params()),
        ]
    }

    #[test]
    fn test_builders_have_unique_names() {
        for (family, params) in all_builders() {
            assert!(!params.is_empty(), "{family} declares no parameters");
            let names: HashSet<_> = params.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names.len(), params.len(), "{family} repeats a name");
        }
    }

    #[test]
    fn test_builders_are_deterministic() {
        assert_eq!(sdca_params(), sdca_params());
        assert_eq!(light_gbm_params(), light_gbm_params());
    }

    #[test]
    fn test_default_values_are_legal() {
        for (family, params) in all_builders() {
            for p in &params {
                assert!(
                    p.contains(&p.default_value()),
                    "{family}: default of {} is outside its domain",
                    p.name
                );
            }
        }
    }

    #[test]
    fn test_multiclass_light_gbm_adds_softmax_only() {
        let binary: HashSet<_> = light_gbm_params().into_iter().map(|p| p.name).collect();
        let multi: HashSet<_> = light_gbm_multiclass_params()
            .into_iter()
            .map(|p| p.name)
            .collect();
        let extra: Vec<_> = multi.difference(&binary).collect();
        assert_eq!(extra, vec!["UseSoftmax"]);
    }
}
