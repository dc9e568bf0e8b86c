use super::{conv, lrn, max_pool, relu_on};
use crate::assert_err;
use crate::errors::NetError;
use crate::net::{
    ConvolutionParam, Layer, LayerKind, Network, layer_field, layer_rate, layer_size,
    rate_and_field,
};

/// data -> c1(k3, s2) -> c2(k3, s2)
fn two_convs() -> Network {
    Network::new(
        "two",
        &["data"],
        vec![conv("c1", "data", 8, 3, 2), conv("c2", "c1", 8, 3, 2)],
    )
}

#[test]
fn test_input_is_identity() -> Result<(), NetError> {
    let net = two_convs();
    assert_eq!(rate_and_field(&net, "data")?, (1, (1, 1)));
    Ok(())
}

#[test]
fn test_single_conv() -> Result<(), NetError> {
    let net = Network::new("one", &["data"], vec![conv("c1", "data", 8, 5, 3)]);
    assert_eq!(layer_rate(&net, "c1")?, 3);
    assert_eq!(layer_field(&net, "c1")?, (5, 5));
    Ok(())
}

#[test]
fn test_chained_convs() -> Result<(), NetError> {
    let net = two_convs();
    assert_eq!(layer_rate(&net, "c2")?, 4);
    // (3 - 1) * 2 + 3
    assert_eq!(layer_field(&net, "c2")?, (7, 7));
    Ok(())
}

#[test]
fn test_rectangular_kernel_and_lrn() -> Result<(), NetError> {
    let mut param = ConvolutionParam::new(4, 0, 1);
    param.kernel_size = None;
    param.kernel_h = 3;
    param.kernel_w = 5;
    let net = Network::new(
        "rect",
        &["data"],
        vec![
            Layer::new("c1", LayerKind::Convolution(param), &["data"], &["c1"]),
            lrn("n1", "c1"),
            max_pool("p1", "n1", 2, 2),
        ],
    );
    assert_eq!(rate_and_field(&net, "n1")?, (1, (3, 5)));
    // 池化：rate 2，field = (2 - 1) * 1 + (3, 5)
    assert_eq!(rate_and_field(&net, "p1")?, (2, (4, 6)));
    Ok(())
}

#[test]
fn test_in_place_relu_is_transparent() -> Result<(), NetError> {
    let mut net = two_convs();
    net.layers.insert(1, relu_on("r1", "c1"));
    assert_eq!(rate_and_field(&net, "c2")?, (4, (7, 7)));
    Ok(())
}

#[test]
fn test_unsupported_layers() {
    let mut net = two_convs();
    net.layers.push(Layer::new(
        "fc",
        LayerKind::Unsupported("InnerProduct".to_string()),
        &["c2"],
        &["fc"],
    ));
    assert_err!(
        layer_rate(&net, "fc"),
        NetError::UnsupportedConfiguration { layer, message }
            if layer == "fc" && message.contains("InnerProduct")
    );

    let mut net = two_convs();
    net.layers.push(Layer::new(
        "r",
        LayerKind::Relu(Default::default()),
        &["c2"],
        &["r"],
    ));
    assert_err!(layer_rate(&net, "r"), NetError::UnsupportedConfiguration { .. });
}

#[test]
fn test_missing_producer_and_multi_input() {
    let net = two_convs();
    assert_err!(layer_rate(&net, "nowhere"), NetError::MalformedGraph("找不到"));

    let mut net = two_convs();
    net.layers[1].bottom.push("data".to_string());
    assert_err!(layer_rate(&net, "c2"), NetError::MalformedGraph("恰有一个输入"));
}

#[test]
fn test_cycle_is_reported() {
    let net = Network::new(
        "cycle",
        &["data"],
        vec![conv("a", "b", 1, 1, 1), conv("b", "a", 1, 1, 1)],
    );
    assert_err!(layer_rate(&net, "a"), NetError::MalformedGraph("环"));
}

#[test]
fn test_layer_size() -> Result<(), NetError> {
    let net = two_convs();
    // 11 -> ceil(9 / 2) = 5 -> ceil(3 / 2) = 2
    assert_eq!(layer_size(&net, "c2", (11, 12))?, (2, 2));
    assert_eq!(layer_size(&net, "c1", (11, 12))?, (5, 5));
    assert_eq!(layer_size(&net, "data", (11, 12))?, (11, 12));
    assert_err!(layer_size(&net, "c2", (4, 11)), NetError::DimensionMismatch([3, 3], [1, 5]));
    Ok(())
}

#[test]
fn test_layer_size_pooling_rounds_up() -> Result<(), NetError> {
    let net = Network::new(
        "pool",
        &["data"],
        vec![conv("c1", "data", 4, 3, 1), max_pool("p1", "c1", 2, 2)],
    );
    // 5 -> 3 -> ceil(1 / 2) + 1 = 2
    assert_eq!(layer_size(&net, "p1", (5, 6))?, (2, 2));

    // 步长大于窗口时，起点落在输入之外的窗口被舍去：5 -> 起点 0、3
    let net = Network::new("sparse", &["data"], vec![max_pool("p1", "data", 1, 3)]);
    assert_eq!(layer_size(&net, "p1", (5, 7))?, (2, 3));
    Ok(())
}
