use serde_json::json;

use demandflow::{
    DemandErrorKind, Payload, RegistryExtension, SupplierRegistry, resolve, supplier_fn,
    typed_supplier,
};

use crate::registry_of;

#[tokio::test]
async fn given_constant_root_supplier_when_resolved_then_its_value_is_returned() {
    let root = supplier_fn(|_payload, _scope| async { Ok(json!("HELLO")) });
    let result = resolve(root, SupplierRegistry::new())
        .await
        .expect("resolution should succeed");
    assert_eq!(result, json!("HELLO"));
}

#[tokio::test]
async fn given_supplier_added_via_extension_when_demanded_then_it_computes_the_value() {
    let root = supplier_fn(|_payload, scope| async move {
        let plustwo = typed_supplier(|input: i64, _scope| async move { Ok(input + 2) });
        scope
            .demand(
                "plustwo",
                json!(5),
                Some(RegistryExtension::new().with_supplier("plustwo", plustwo)),
            )
            .await
    });
    let initial = registry_of(vec![(
        "plusone",
        typed_supplier(|input: i64, _scope| async move { Ok(input + 1) }),
    )]);

    let result = resolve(root, initial)
        .await
        .expect("resolution should succeed");
    assert_eq!(result, json!(7));
}

#[tokio::test]
async fn given_removal_extension_when_demanding_the_removed_key_then_it_fails() {
    let root = supplier_fn(|_payload, scope| async move {
        let value = scope
            .demand(
                "A",
                Payload::Null,
                Some(RegistryExtension::new().without("B")),
            )
            .await?;
        assert_eq!(value, json!("A"));

        let err = scope
            .demand(
                "B",
                Payload::Null,
                Some(RegistryExtension::new().without("B")),
            )
            .await
            .expect_err("removed supplier must not resolve");
        assert_eq!(err.kind, DemandErrorKind::SupplierNotFound);
        assert_eq!(err.key.as_deref(), Some("B"));

        Ok(value)
    });
    let initial = registry_of(vec![
        ("A", supplier_fn(|_, _| async { Ok(json!("A")) })),
        ("B", supplier_fn(|_, _| async { Ok(json!("B")) })),
    ]);

    let result = resolve(root, initial)
        .await
        .expect("resolution should succeed");
    assert_eq!(result, json!("A"));
}

#[tokio::test]
async fn given_clear_and_add_extension_when_demanded_then_only_the_added_supplier_exists() {
    let root = supplier_fn(|_payload, scope| async move {
        let extension = RegistryExtension::new()
            .with_supplier("C", supplier_fn(|_, _| async { Ok(json!("C")) }))
            .cleared();
        let value = scope.demand("C", Payload::Null, Some(extension.clone())).await?;

        // A and B are gone from the cleared subtree.
        let err = scope
            .demand("A", Payload::Null, Some(extension))
            .await
            .expect_err("cleared supplier must not resolve");
        assert_eq!(err.kind, DemandErrorKind::SupplierNotFound);

        Ok(value)
    });
    let initial = registry_of(vec![
        ("A", supplier_fn(|_, _| async { Ok(json!("A")) })),
        ("B", supplier_fn(|_, _| async { Ok(json!("B")) })),
    ]);

    let result = resolve(root, initial)
        .await
        .expect("resolution should succeed");
    assert_eq!(result, json!("C"));
}

#[tokio::test]
async fn given_missing_key_when_demanded_then_supplier_not_found_is_reported() {
    let root =
        supplier_fn(|_payload, scope| async move { scope.demand("missing", Payload::Null, None).await });
    let err = resolve(root, SupplierRegistry::new())
        .await
        .expect_err("missing supplier must fail the resolution");
    assert_eq!(err.kind, DemandErrorKind::SupplierNotFound);
    assert_eq!(err.key.as_deref(), Some("missing"));
}

#[tokio::test]
async fn given_typed_root_expecting_a_number_when_resolved_then_a_configuration_error_is_returned() {
    // The entry point hands the root a null payload; a root that insists
    // on a concrete input type gets a recoverable error, not a panic.
    let root = typed_supplier(|input: i64, _scope| async move { Ok(input * 2) });
    let err = resolve(root, SupplierRegistry::new())
        .await
        .expect_err("payload mismatch must surface as an error");
    assert_eq!(err.kind, DemandErrorKind::Configuration);
}

#[tokio::test]
async fn given_slow_supplier_when_demanded_then_the_caller_awaits_its_completion() {
    let root = supplier_fn(|_payload, scope| async move {
        let doubler = typed_supplier(|input: i64, _scope| async move {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            Ok(input * 2)
        });
        scope
            .demand(
                "delayed",
                json!(21),
                Some(RegistryExtension::new().with_supplier("delayed", doubler)),
            )
            .await
    });

    let started = std::time::Instant::now();
    let result = resolve(root, SupplierRegistry::new())
        .await
        .expect("resolution should succeed");
    assert_eq!(result, json!(42));
    assert!(started.elapsed() >= std::time::Duration::from_millis(50));
}
