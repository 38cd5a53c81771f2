use stunt_double::{any, args, Expectation, MockHandle, Times};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, Default)]
struct Product {
    id: u32,
    name: String,
}

trait ProductStore {
    async fn names(&self) -> Vec<String>;
    async fn find(&self, id: u32) -> Option<Product>;
    async fn save(&self, product: Product);
}

/// Hand-written adapter: the macro only covers synchronous methods.
struct MockProductStore {
    handle: MockHandle,
}

impl ProductStore for MockProductStore {
    async fn names(&self) -> Vec<String> {
        self.handle.call_ready_or_default("names", ()).await
    }

    async fn find(&self, id: u32) -> Option<Product> {
        self.handle.call_ready("find", (id,)).await
    }

    async fn save(&self, product: Product) {
        self.handle.call_ready("save", (product,)).await
    }
}

async fn count_products(store: &impl ProductStore) -> usize {
    store.names().await.len()
}

#[tokio::test]
async fn test_async_operation_returns_completed_result() {
    let store = MockProductStore {
        handle: MockHandle::of([Expectation::on("names").returns(vec!["AAA", "BBB"])]),
    };

    assert_eq!(
        store.names().await,
        vec!["AAA".to_string(), "BBB".to_string()]
    );
    assert_eq!(count_products(&store).await, 2);
}

#[tokio::test]
async fn test_async_computed_response() {
    let handle = MockHandle::new_named("products");
    handle
        .add_expectation(
            Expectation::on("find")
                .with(args![any()])
                .returns_with(|(id,): (u32,)| {
                    Some(Product {
                        id,
                        name: format!("product-{}", id),
                    })
                }),
        )
        .unwrap();
    let store = MockProductStore { handle };

    let found = store.find(7).await;
    assert_eq!(
        found,
        Some(Product {
            id: 7,
            name: "product-7".to_string(),
        })
    );
}

#[tokio::test]
async fn test_async_unconfigured_call_is_lenient() {
    let store = MockProductStore {
        handle: MockHandle::new(),
    };

    assert_eq!(store.find(1).await, None);
    assert!(store.names().await.is_empty());
}

#[tokio::test]
async fn test_async_calls_are_verified_with_structured_arguments() {
    let store = MockProductStore {
        handle: MockHandle::new(),
    };

    store
        .save(Product {
            id: 1,
            name: "widget".to_string(),
        })
        .await;

    store
        .handle
        .verify(
            "save",
            args![stunt_double::is("named widget", |p: &Product| p.name == "widget")],
            Times::once(),
        )
        .unwrap();
    store
        .handle
        .verify(
            "save",
            args![stunt_double::eq(Product {
                id: 1,
                name: "widget".to_string(),
            })],
            Times::once(),
        )
        .unwrap();
}
