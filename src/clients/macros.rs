/// Generates `get_`/`create_`/`update_`/`delete_` methods on a client wrapper
/// that delegate to one of its `ResourceClient` fields.
#[macro_export]
macro_rules! impl_client_methods {
    ($client_name:ident, $field:ident, $entity:ty, $entity_name_snake:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](&self, id: &str) -> Result<$entity, $crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    self.$field.get(id).await
                }

                #[tracing::instrument(skip(self, payload))]
                pub async fn [<create_ $entity_name_snake>](
                    &self,
                    payload: &<$entity as $crate::actor_framework::Entity>::CreatePayload,
                ) -> Result<String, $crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    self.$field.create(payload).await
                }

                #[tracing::instrument(skip(self, payload))]
                pub async fn [<update_ $entity_name_snake>](
                    &self,
                    id: &str,
                    payload: &<$entity as $crate::actor_framework::Entity>::UpdatePayload,
                ) -> Result<String, $crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    self.$field.update(id, payload).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $entity_name_snake>](&self, id: &str) -> Result<String, $crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    self.$field.delete(id).await
                }
            }
        }
    };
}

/// Generates `list_<plural>` against the resource's default collection path.
#[macro_export]
macro_rules! impl_list_method {
    ($client_name:ident, $field:ident, $entity:ty, $entity_plural_snake:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $entity_plural_snake>](
                    &self,
                    query: &<$entity as $crate::actor_framework::Entity>::Query,
                ) -> Result<$crate::domain::PagedResult<$entity>, $crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    self.$field.list(query).await
                }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $entity_name_snake:ident, $entity_plural_snake:ident) => {
        $crate::impl_client_new!($client_name, $entity);
        $crate::impl_client_methods!($client_name, inner, $entity, $entity_name_snake);
        $crate::impl_list_method!($client_name, inner, $entity, $entity_plural_snake);
    };
}
