use burn::{
    module::Param,
    nn::Linear,
    prelude::*,
    tensor::activation::relu,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::{ClassifierError, Result};

// #[derive(Config)] already provides Clone, Serialize and Deserialize.
#[derive(Config, Debug)]
pub struct ClassifierConfig {
    #[config(default = "4")]
    pub in_features:  usize,
    #[config(default = "8")]
    pub hidden1:      usize,
    #[config(default = "9")]
    pub hidden2:      usize,
    #[config(default = "3")]
    pub out_features: usize,
}

impl ClassifierConfig {
    /// Layer widths in order: input, hidden 1, hidden 2, output.
    pub fn widths(&self) -> [usize; 4] {
        [self.in_features, self.hidden1, self.hidden2, self.out_features]
    }

    pub fn validate(&self) -> Result<()> {
        let names = ["in_features", "hidden1", "hidden2", "out_features"];
        for (name, width) in names.iter().zip(self.widths()) {
            if width == 0 {
                return Err(ClassifierError::config(format!("{name} must be positive")));
            }
        }
        Ok(())
    }

    /// Build an untrained classifier. Parameters are drawn from a
    /// StdRng seeded with `seed`, so equal seeds give equal models.
    pub fn init<B: Backend>(&self, seed: u64, device: &B::Device) -> Result<Classifier<B>> {
        self.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let fc1 = seeded_linear(self.in_features, self.hidden1, &mut rng, device);
        let fc2 = seeded_linear(self.hidden1, self.hidden2, &mut rng, device);
        let out = seeded_linear(self.hidden2, self.out_features, &mut rng, device);
        Ok(Classifier { fc1, fc2, out })
    }
}

/// Affine layer with weights and bias uniform in ±1/sqrt(fan_in).
fn seeded_linear<B: Backend>(
    d_input:  usize,
    d_output: usize,
    rng:      &mut StdRng,
    device:   &B::Device,
) -> Linear<B> {
    let bound = 1.0 / (d_input as f32).sqrt();
    let weight: Vec<f32> = (0..d_input * d_output)
        .map(|_| rng.gen_range(-bound..bound))
        .collect();
    let bias: Vec<f32> = (0..d_output)
        .map(|_| rng.gen_range(-bound..bound))
        .collect();

    // Burn stores linear weights as [d_input, d_output]
    let weight = Tensor::<B, 1>::from_floats(weight.as_slice(), device)
        .reshape([d_input, d_output]);
    let bias = Tensor::<B, 1>::from_floats(bias.as_slice(), device);

    Linear {
        weight: Param::from_tensor(weight),
        bias:   Some(Param::from_tensor(bias)),
    }
}

#[derive(Module, Debug)]
pub struct Classifier<B: Backend> {
    pub fc1: Linear<B>,
    pub fc2: Linear<B>,
    pub out: Linear<B>,
}

impl<B: Backend> Classifier<B> {
    /// features: [batch, in_features] → class scores: [batch, out_features]
    ///
    /// Scores are unnormalised; apply softmax for probabilities.
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = relu(self.fc1.forward(features));
        let x = relu(self.fc2.forward(x));
        self.out.forward(x)
    }

    /// Scores for a single sample.
    pub fn scores(&self, features: &[f32]) -> Result<Vec<f32>> {
        let [in_features, ..] = self.widths();
        if features.len() != in_features {
            return Err(ClassifierError::config(format!(
                "model expects {in_features} features, got {}",
                features.len()
            )));
        }
        let input = Tensor::<B, 1>::from_floats(features, &self.device())
            .reshape([1, in_features]);

        self.forward(input)
            .into_data()
            .convert::<f32>()
            .to_vec::<f32>()
            .map_err(|e| ClassifierError::config(format!("cannot read scores: {e:?}")))
    }

    /// Layer widths recovered from the parameter shapes.
    pub fn widths(&self) -> [usize; 4] {
        let [d_in, h1]  = self.fc1.weight.dims();
        let [_, h2]     = self.fc2.weight.dims();
        let [_, d_out]  = self.out.weight.dims();
        [d_in, h1, h2, d_out]
    }

    pub fn device(&self) -> B::Device {
        self.fc1.weight.device()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn build(seed: u64) -> Classifier<TestBackend> {
        ClassifierConfig::new().init(seed, &Default::default()).unwrap()
    }

    #[test]
    fn test_default_widths() {
        let model = build(41);
        assert_eq!(model.widths(), [4, 8, 9, 3]);
        assert_eq!(model.widths(), ClassifierConfig::new().widths());
    }

    #[test]
    fn test_forward_yields_three_scores() {
        let model = build(41);
        let scores = model.scores(&[5.6, 3.7, 2.2, 0.5]).unwrap();
        assert_eq!(scores.len(), 3);
        assert!(scores.iter().all(|s| s.is_finite()));

        let batch = Tensor::<TestBackend, 2>::zeros([5, 4], &Default::default());
        assert_eq!(model.forward(batch).dims(), [5, 3]);
    }

    #[test]
    fn test_custom_widths_still_map_to_output_width() {
        let model: Classifier<TestBackend> = ClassifierConfig::new()
            .with_hidden1(16)
            .with_hidden2(2)
            .init(0, &Default::default())
            .unwrap();
        assert_eq!(model.widths(), [4, 16, 2, 3]);
        assert_eq!(model.scores(&[0.0, 1.0, 2.0, 3.0]).unwrap().len(), 3);
    }

    #[test]
    fn test_same_seed_same_parameters() {
        let input = [6.7, 3.3, 5.7, 2.1];
        assert_eq!(build(7).scores(&input).unwrap(), build(7).scores(&input).unwrap());
        assert_ne!(build(7).scores(&input).unwrap(), build(8).scores(&input).unwrap());
    }

    #[test]
    fn test_zero_width_rejected() {
        for cfg in [
            ClassifierConfig::new().with_in_features(0),
            ClassifierConfig::new().with_hidden1(0),
            ClassifierConfig::new().with_hidden2(0),
            ClassifierConfig::new().with_out_features(0),
        ] {
            let result = cfg.init::<TestBackend>(0, &Default::default());
            assert!(matches!(result, Err(ClassifierError::Config(_))));
        }
    }

    #[test]
    fn test_wrong_input_length_rejected() {
        let model = build(41);
        assert!(matches!(model.scores(&[1.0, 2.0]), Err(ClassifierError::Config(_))));
    }
}
