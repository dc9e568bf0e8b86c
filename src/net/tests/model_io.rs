use super::{conv, max_pool, relu_on};
use crate::assert_err;
use crate::errors::NetError;
use crate::net::{Blob, LayerKind, Network, NormRegion, PoolMethod, load_mean_npy, parse_mean};
use ndarray::Array3;

fn weighted_net() -> Network {
    let mut net = Network::new(
        "weighted",
        &["data"],
        vec![
            conv("c1", "data", 2, 1, 1).with_blobs(vec![
                Blob::new([2, 3, 1, 1], vec![1., 2., 3., 4., 5., 6.]),
                Blob::vector(vec![0.5, -0.5]),
            ]),
            relu_on("r1", "c1"),
            max_pool("p1", "c1", 2, 2),
        ],
    );
    net.input_dim = vec![1, 3, 8, 8];
    net
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("caffe_feat_{}_{}", std::process::id(), name))
}

#[test]
fn test_json_round_trip() -> Result<(), NetError> {
    let net = weighted_net();
    let json = net.to_json()?;
    assert!(json.contains("\"Convolution\""));
    assert!(json.contains("\"ReLU\""));
    assert_eq!(Network::from_json(&json)?, net);
    Ok(())
}

#[test]
fn test_json_defaults() -> Result<(), NetError> {
    let json = r#"{
        "input": ["data"],
        "layers": [
            {"name": "c1", "kind": {"Convolution": {"num_output": 4, "kernel_size": 3}},
             "bottom": ["data"], "top": ["c1"]},
            {"name": "p1", "kind": {"Pooling": {"pool": "AVE", "kernel_size": 2}},
             "bottom": ["c1"], "top": ["p1"]},
            {"name": "n1", "kind": {"LRN": {}}, "bottom": ["p1"], "top": ["n1"]},
            {"name": "fc", "kind": {"Unsupported": "InnerProduct"}, "bottom": ["n1"], "top": ["fc"]}
        ]
    }"#;
    let net = Network::from_json(json)?;
    assert!(net.input_dim.is_empty());
    let LayerKind::Convolution(param) = &net.layers[0].kind else {
        panic!("应为卷积层");
    };
    assert_eq!((param.stride, param.pad, param.group), (1, 0, 1));
    assert_eq!(param.kernel(), (3, 3));
    let LayerKind::Pooling(pool) = &net.layers[1].kind else {
        panic!("应为池化层");
    };
    assert_eq!(pool.pool, PoolMethod::Ave);
    let LayerKind::Lrn(norm) = &net.layers[2].kind else {
        panic!("应为LRN层");
    };
    assert_eq!(norm.local_size, 5);
    assert_eq!(norm.alpha, 1.);
    assert_eq!(norm.beta, 0.75);
    assert_eq!(norm.norm_region, NormRegion::AcrossChannels);
    assert_eq!(net.layers[3].kind.type_name(), "InnerProduct");
    assert!(net.layers.iter().all(|l| l.blobs.is_empty()));
    Ok(())
}

#[test]
fn test_save_and_load() -> Result<(), NetError> {
    let net = weighted_net();
    let path = temp_path("net.bin");
    net.save(&path)?;
    let loaded = Network::load(&path);
    std::fs::remove_file(&path)?;
    assert_eq!(loaded?, net);
    Ok(())
}

#[test]
fn test_load_missing_file() {
    assert_err!(
        Network::load("./no/such/net.bin"),
        NetError::FileNotFound(path) if path.ends_with("net.bin")
    );
}

#[test]
fn test_parse_mean() -> Result<(), NetError> {
    assert_eq!(parse_mean("104,117,123")?, [104., 117., 123.]);
    assert_eq!(parse_mean(" 0.5, 1 ,2 ")?, [0.5, 1., 2.]);
    assert_err!(parse_mean("1,2"), NetError::InvalidInput(_));
    assert_err!(parse_mean("1,2,3,4"), NetError::InvalidInput(_));
    assert_err!(parse_mean("1,x,3"), NetError::InvalidInput(msg) if msg.contains("`x`"));
    Ok(())
}

#[test]
fn test_load_mean_npy() -> Result<(), NetError> {
    let mut image = Array3::<f64>::zeros((3, 2, 4));
    image.index_axis_mut(ndarray::Axis(0), 0).fill(104.);
    image.index_axis_mut(ndarray::Axis(0), 1).fill(117.);
    // 第2个通道取值 100..=107，均值103.5
    for (i, x) in image.index_axis_mut(ndarray::Axis(0), 2).iter_mut().enumerate() {
        *x = 100. + i as f64;
    }
    let path = temp_path("mean.npy");
    ndarray_npy::write_npy(&path, &image).map_err(|e| NetError::InvalidInput(e.to_string()))?;
    let mean = load_mean_npy(&path);
    std::fs::remove_file(&path)?;
    assert_eq!(mean?, [104., 117., 103.5]);

    assert_err!(load_mean_npy(temp_path("missing.npy")), NetError::FileNotFound(_));
    Ok(())
}

#[test]
fn test_load_mean_npy_rejects_wrong_channels() -> Result<(), NetError> {
    let path = temp_path("mean4.npy");
    ndarray_npy::write_npy(&path, &Array3::<f64>::zeros((4, 2, 2)))
        .map_err(|e| NetError::InvalidInput(e.to_string()))?;
    let mean = load_mean_npy(&path);
    std::fs::remove_file(&path)?;
    assert_err!(mean, NetError::InvalidInput(msg) if msg.contains("3通道"));
    Ok(())
}
