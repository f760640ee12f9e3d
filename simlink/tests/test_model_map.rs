//! Scenarios covering loading and querying model catalogs.

use std::sync::Arc;

use simlink::{
    schema::{counts::CatalogCounts, DataType, Dims, ElementRecord, EntryKind, MapTable, Orientation},
    DefaultTypeMapper, Error, ModelRegistry, TableTypeMapper,
};

fn gain_model(name: &str) -> MapTable {
    let mut table = MapTable::new(name);
    table.signals.push(
        ElementRecord::new("Out1", "real_T")
            .in_block("Gain1")
            .with_shape(Dims::new(vec![1]), Orientation::Scalar),
    );
    table
}

#[test_log::test]
fn test_controller_signal() {
    let mut registry = ModelRegistry::new();
    registry
        .load(gain_model("Controller"), &DefaultTypeMapper)
        .unwrap();

    let signal = registry
        .lookup_signal("Controller", "Gain1", "Out1")
        .unwrap();
    assert_eq!(
        signal.data_type,
        DataType {
            native_type: "real_T".to_string(),
            host_type: "float64".to_string(),
            dims: Dims::new(vec![1]),
            orientation: Orientation::Scalar,
        }
    );
}

#[test]
fn test_models_do_not_cross() {
    let mut registry = ModelRegistry::new();
    let mut a = gain_model("A");
    a.signals[0].native_type = "real32_T".to_string();
    registry.load(a, &DefaultTypeMapper).unwrap();
    registry.load(gain_model("B"), &DefaultTypeMapper).unwrap();

    let model_a = registry.model("A").unwrap();
    let model_b = registry.model("B").unwrap();
    assert_ne!(model_a.owner(), model_b.owner());

    let sig_a = model_a.lookup_signal("Gain1", "Out1").unwrap();
    let sig_b = model_b.lookup_signal("Gain1", "Out1").unwrap();
    assert_eq!(sig_a.data_type.host_type, "float32");
    assert_eq!(sig_b.data_type.host_type, "float64");
    assert!(!std::ptr::eq(sig_a, sig_b));
}

#[test]
fn test_missing_signal() {
    let mut registry = ModelRegistry::new();
    registry
        .load(gain_model("Controller"), &DefaultTypeMapper)
        .unwrap();

    let err = registry
        .lookup_signal("Controller", "Gain1", "Out2")
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err,
        Error::NotFound {
            kind: EntryKind::Signal,
            key: "Gain1:Out2".to_string()
        }
    );
    assert_eq!(err.to_string(), "Unknown signal 'Gain1:Out2'");

    assert_eq!(
        registry.lookup_model_param("Other", "K").unwrap_err(),
        Error::UnknownModel("Other".to_string())
    );
}

#[test]
fn test_load_is_atomic() {
    let mut registry = ModelRegistry::new();

    let mut table = gain_model("Controller");
    let mut child = gain_model("Plant");
    child
        .block_params
        .push(ElementRecord::new("Mode", "GearMode").in_block("Shift"));
    table.children.push(child);

    // The child's enumeration type is unknown to the default mapper
    assert_eq!(
        registry.load(table.clone(), &DefaultTypeMapper).unwrap_err(),
        Error::UnknownType("GearMode".to_string())
    );
    assert!(registry.is_empty());

    let mut mapper = TableTypeMapper::new();
    mapper.register("GearMode", "int32");
    registry.load(table, &mapper).unwrap();
    assert_eq!(registry.models(), ["Controller", "Plant"]);
    assert_eq!(registry.root_models(), ["Controller"]);
    assert_eq!(registry.children("Controller").unwrap(), ["Plant"]);

    // Reloading any model of the tree is rejected and changes nothing
    assert_eq!(
        registry.load(gain_model("Plant"), &mapper).unwrap_err(),
        Error::DuplicateModel("Plant".to_string())
    );
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_duplicate_model_in_tree() {
    let mut registry = ModelRegistry::new();
    let mut table = gain_model("Controller");
    let mut child = gain_model("Plant");
    child.children.push(gain_model("Controller"));
    table.children.push(child);

    assert_eq!(
        registry.load(table, &DefaultTypeMapper).unwrap_err(),
        Error::DuplicateModel("Controller".to_string())
    );
    assert!(registry.is_empty());
}

#[test]
fn test_owning_maps() {
    let mut registry = ModelRegistry::new();
    let mut table = gain_model("Controller");
    table.children.push(gain_model("Plant"));
    registry.load(table, &DefaultTypeMapper).unwrap();

    for name in ["Controller", "Plant"] {
        let map = registry.map(name).unwrap();
        assert_eq!(map.model_name(), name);
        assert_eq!(map.id(), registry.model(name).unwrap().owner());
        // Each map keeps only its own table
        assert!(map.table().children.is_empty());
    }
    assert_ne!(
        registry.map("Controller").unwrap().id(),
        registry.map("Plant").unwrap().id()
    );
    assert!(registry.map("Observer").unwrap_err().is_not_found());
}

#[test]
fn test_unload_children() {
    let mut registry = ModelRegistry::new();
    let mut table = gain_model("Controller");
    let mut child = gain_model("Plant");
    child.children.push(gain_model("Actuator"));
    table.children.push(child);
    registry.load(table, &DefaultTypeMapper).unwrap();
    registry
        .load(gain_model("Observer"), &DefaultTypeMapper)
        .unwrap();
    assert_eq!(registry.len(), 4);

    registry.unload("Plant").unwrap();
    assert_eq!(registry.models(), ["Controller", "Observer"]);
    assert!(registry.children("Controller").unwrap().is_empty());

    registry.unload("Controller").unwrap();
    assert_eq!(registry.models(), ["Observer"]);
    assert_eq!(
        registry.unload("Controller").unwrap_err(),
        Error::UnknownModel("Controller".to_string())
    );

    // A fresh load gets a fresh identity
    let old_owner = registry.model("Observer").unwrap().owner();
    registry.unload("Observer").unwrap();
    let reloaded = registry
        .load(gain_model("Observer"), &DefaultTypeMapper)
        .unwrap();
    assert_ne!(reloaded.owner(), old_owner);
}

#[test]
fn test_load_json() {
    let json = r#"{
        "model_name": "Controller",
        "model_params": [
            { "name": "K", "native_type": "real_T", "dims": [3, 3], "orientation": "column_major" }
        ],
        "block_params": [
            { "block_name": "Controller/Gain1", "name": "Gain", "native_type": "real_T", "dims": [1, 1] }
        ],
        "signals": [
            { "block_name": "Controller/Gain1", "name": "Out1", "native_type": "real_T", "dims": [1, -1], "orientation": "vector" },
            { "block_name": "Controller/Sum", "name": "Out1", "native_type": "int32_T", "dims": [1, 1] }
        ],
        "children": [
            { "model_name": "Plant" }
        ]
    }"#;

    let mut registry = ModelRegistry::new();
    let info = registry.load_json(json, &DefaultTypeMapper).unwrap();
    let counts = info.counts();
    assert_eq!(counts.num_model_params, 1);
    assert_eq!(counts.num_block_params, 1);
    assert_eq!(counts.num_signals, 2);
    assert_eq!(counts.num_blocks, 2);
    assert_eq!(counts.num_dynamic, 1);

    let k = registry.lookup_model_param("Controller", "K").unwrap();
    assert_eq!(k.data_type.orientation, Orientation::ColumnMajor);
    assert_eq!(k.data_type.dims.width(), Some(9));
    assert!(registry.model("Plant").unwrap().signals().is_empty());

    assert!(matches!(
        registry.load_json("{ \"signals\": [] }", &DefaultTypeMapper),
        Err(Error::Schema(_))
    ));
}

#[test]
fn test_concurrent_readers() {
    let mut table = MapTable::new("Controller");
    for i in 0..64 {
        table
            .signals
            .push(ElementRecord::new(format!("Out{i}"), "real_T").in_block(format!("Gain{i}")));
    }
    let mut registry = ModelRegistry::new();
    registry.load(table, &DefaultTypeMapper).unwrap();
    let registry = Arc::new(registry);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                (0..64)
                    .filter(|i| {
                        registry
                            .lookup_signal("Controller", &format!("Gain{i}"), &format!("Out{i}"))
                            .is_ok()
                    })
                    .count()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 64);
    }
}
