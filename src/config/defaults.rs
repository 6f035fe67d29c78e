// SPDX-License-Identifier: MPL-2.0
//! Default values for user-configurable settings.

/// MobileNet v2 checkpoint from the ONNX model zoo (~14 MB).
pub const MODEL_URL: &str =
    "https://github.com/onnx/models/raw/main/validated/vision/classification/mobilenet/model/mobilenetv2-10.onnx";

/// ImageNet class names, one per line, index-aligned with the model output.
pub const LABELS_URL: &str =
    "https://raw.githubusercontent.com/pytorch/hub/master/imagenet_classes.txt";

/// Number of predictions shown per classification.
pub const TOP_K: usize = 5;
