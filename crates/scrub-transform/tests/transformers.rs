//! End-to-end transformer behavior driven through `Config`.

use scrub_model::{Config, UnknownPolicy};
use scrub_transform::{
    DateTimeTransformer, Discretizer, LabelEncoding, MinMaxScaler, OneHotEncoding,
    TextTransformer, summary,
};
use serde_json::json;

#[test]
fn text_transformer_honors_config_overrides() {
    let mut config = Config::default();
    config
        .set("transformers.text.remove_stopwords", json!(true))
        .unwrap();
    config.set("transformers.text.lowercase", json!(false)).unwrap();

    let transformer = TextTransformer::new(&config);
    assert_eq!(
        transformer.tokenize("The Cat and The Hat"),
        vec!["Cat", "Hat"]
    );
}

#[test]
fn fitted_scaler_applies_to_later_values() {
    let scaler = MinMaxScaler::fit(&[0.0, 50.0, 100.0]).unwrap();
    // Values outside the fitted range extrapolate linearly.
    assert_eq!(scaler.transform(25.0), 0.25);
    assert_eq!(scaler.transform(150.0), 1.5);
    assert_eq!(scaler.transform(-50.0), -0.5);
}

#[test]
fn discretizer_round_trips_through_serde() {
    let discretizer = Discretizer::equal_width(&[0.0, 100.0], 4).unwrap();
    let encoded = serde_json::to_string(&discretizer).unwrap();
    let decoded: Discretizer = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded.bin(10.0).label, "bin_1");
    assert_eq!(decoded.bin(99.0).label, "bin_4");
}

#[test]
fn summary_and_binning_agree_on_spread() {
    let data = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
    let stats = summary(&data).unwrap();
    let discretizer = Discretizer::equal_width(&data, 3).unwrap();
    assert_eq!(discretizer.bin(stats.min).index, 0);
    assert_eq!(discretizer.bin(stats.max).index, 2);
}

#[test]
fn encodings_share_the_unknown_policy_from_config() {
    let mut config = Config::default();
    config
        .set("transformers.categorical.unknown_policy", json!("label"))
        .unwrap();
    config
        .set("transformers.categorical.unknown_label", json!("other"))
        .unwrap();
    let options = &config.transformers.categorical;
    assert_eq!(options.unknown_policy, UnknownPolicy::Label);

    let labels = LabelEncoding::fit(["a", "b"], options);
    assert_eq!(labels.encode("zzz").unwrap(), 2);

    let one_hot = OneHotEncoding::fit(["a", "b"], options);
    let indicators = one_hot.encode("zzz").unwrap();
    assert_eq!(indicators["other"], 1);
}

#[test]
fn datetime_features_use_the_configured_input_formats() {
    let mut config = Config::default();
    config
        .set("cleaners.datetime.input_formats", json!(["%d.%m.%Y"]))
        .unwrap();
    let transformer = DateTimeTransformer::new(&config);
    let parts = transformer.extract_parts("15.06.2023").unwrap();
    assert_eq!((parts.year, parts.month, parts.day), (2023, 6, 15));
}
