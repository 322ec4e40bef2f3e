#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoInstance {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    /// host:port
    #[prost(string, tag = "2")]
    pub addr: ::prost::alloc::string::String,
    #[prost(int64, tag = "3")]
    pub weight: i64,
    #[prost(map = "string, string", tag = "4")]
    pub meta:
        ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoRegisterReq {
    #[prost(string, tag = "1")]
    pub service: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub instance: ::core::option::Option<ProtoInstance>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoRegisterResult {
    #[prost(bool, tag = "1")]
    pub ok: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoDeregisterReq {
    #[prost(string, tag = "1")]
    pub service: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoDeregisterResult {
    #[prost(bool, tag = "1")]
    pub ok: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLookupReq {
    #[prost(string, tag = "1")]
    pub service: ::prost::alloc::string::String,
}
/// Sorted by id, then addr.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLookupResult {
    #[prost(message, repeated, tag = "1")]
    pub instances: ::prost::alloc::vec::Vec<ProtoInstance>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetReq {
    #[prost(string, tag = "1")]
    pub key: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetResult {
    #[prost(bool, tag = "1")]
    pub found: bool,
    #[prost(string, tag = "2")]
    pub value: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub responder_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPutReq {
    #[prost(string, tag = "1")]
    pub key: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub value: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPutResult {
    #[prost(oneof = "proto_put_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_put_result::Result>,
}
/// Nested message and enum types in `ProtoPutResult`.
pub mod proto_put_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoPutSuccess),
        #[prost(message, tag = "2")]
        Err(super::ProtoPutError),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPutSuccess {
    #[prost(string, tag = "1")]
    pub responder_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPutError {
    #[prost(oneof = "proto_put_error::Err", tags = "1, 2")]
    pub err: ::core::option::Option<proto_put_error::Err>,
}
/// Nested message and enum types in `ProtoPutError`.
pub mod proto_put_error {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Err {
        #[prost(message, tag = "1")]
        NotPrimary(super::ProtoNotPrimary),
        #[prost(message, tag = "2")]
        ServerFault(super::ProtoServerFault),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoNotPrimary {
    #[prost(string, tag = "1")]
    pub responder_id: ::prost::alloc::string::String,
    /// Empty if the responder doesn't know the primary yet.
    #[prost(string, tag = "2")]
    pub redirect_to: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoServerFault {
    #[prost(string, tag = "1")]
    pub message: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoApplyReq {
    #[prost(uint64, tag = "1")]
    pub seq: u64,
    #[prost(string, tag = "2")]
    pub key: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub value: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoApplyResult {
    #[prost(oneof = "proto_apply_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_apply_result::Result>,
}
/// Nested message and enum types in `ProtoApplyResult`.
pub mod proto_apply_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoApplySuccess),
        #[prost(message, tag = "2")]
        Err(super::ProtoApplyError),
    }
}
/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoApplySuccess {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoApplyError {
    #[prost(oneof = "proto_apply_error::Err", tags = "1")]
    pub err: ::core::option::Option<proto_apply_error::Err>,
}
/// Nested message and enum types in `ProtoApplyError`.
pub mod proto_apply_error {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Err {
        #[prost(message, tag = "1")]
        OutOfOrder(super::ProtoOutOfOrder),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOutOfOrder {
    #[prost(uint64, tag = "1")]
    pub last_applied: u64,
    #[prost(uint64, tag = "2")]
    pub received_seq: u64,
}
/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoSnapshotReq {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoSnapshotResult {
    #[prost(oneof = "proto_snapshot_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_snapshot_result::Result>,
}
/// Nested message and enum types in `ProtoSnapshotResult`.
pub mod proto_snapshot_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoSnapshotSuccess),
        #[prost(message, tag = "2")]
        Err(super::ProtoSnapshotError),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoSnapshotSuccess {
    #[prost(uint64, tag = "1")]
    pub seq: u64,
    #[prost(map = "string, string", tag = "2")]
    pub state:
        ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoSnapshotError {
    #[prost(oneof = "proto_snapshot_error::Err", tags = "1")]
    pub err: ::core::option::Option<proto_snapshot_error::Err>,
}
/// Nested message and enum types in `ProtoSnapshotError`.
pub mod proto_snapshot_error {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Err {
        #[prost(message, tag = "1")]
        NotPrimary(super::ProtoNotPrimary),
    }
}
#[doc = r" Generated client implementations."]
pub mod grpc_directory_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    pub struct GrpcDirectoryClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl GrpcDirectoryClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> GrpcDirectoryClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        pub async fn register(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoRegisterReq>,
        ) -> Result<tonic::Response<super::ProtoRegisterResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/replikv.GrpcDirectory/Register");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn deregister(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoDeregisterReq>,
        ) -> Result<tonic::Response<super::ProtoDeregisterResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/replikv.GrpcDirectory/Deregister");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn lookup(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoLookupReq>,
        ) -> Result<tonic::Response<super::ProtoLookupResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/replikv.GrpcDirectory/Lookup");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for GrpcDirectoryClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for GrpcDirectoryClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "GrpcDirectoryClient {{ ... }}")
        }
    }
}
#[doc = r" Generated client implementations."]
pub mod grpc_kv_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    pub struct GrpcKvClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl GrpcKvClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> GrpcKvClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        #[doc = " Served by primary and backups."]
        pub async fn get(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoGetReq>,
        ) -> Result<tonic::Response<super::ProtoGetResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/replikv.GrpcKv/Get");
            self.inner.unary(request.into_request(), path, codec).await
        }
        #[doc = " Served by primary only. Backups reply with a redirect."]
        pub async fn put(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoPutReq>,
        ) -> Result<tonic::Response<super::ProtoPutResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/replikv.GrpcKv/Put");
            self.inner.unary(request.into_request(), path, codec).await
        }
        #[doc = " Primary -> backup."]
        pub async fn apply(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoApplyReq>,
        ) -> Result<tonic::Response<super::ProtoApplyResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/replikv.GrpcKv/Apply");
            self.inner.unary(request.into_request(), path, codec).await
        }
        #[doc = " Backup -> primary."]
        pub async fn snapshot(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoSnapshotReq>,
        ) -> Result<tonic::Response<super::ProtoSnapshotResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/replikv.GrpcKv/Snapshot");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for GrpcKvClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for GrpcKvClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "GrpcKvClient {{ ... }}")
        }
    }
}
#[doc = r" Generated server implementations."]
pub mod grpc_directory_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with GrpcDirectoryServer."]
    #[async_trait]
    pub trait GrpcDirectory: Send + Sync + 'static {
        async fn register(
            &self,
            request: tonic::Request<super::ProtoRegisterReq>,
        ) -> Result<tonic::Response<super::ProtoRegisterResult>, tonic::Status>;
        async fn deregister(
            &self,
            request: tonic::Request<super::ProtoDeregisterReq>,
        ) -> Result<tonic::Response<super::ProtoDeregisterResult>, tonic::Status>;
        async fn lookup(
            &self,
            request: tonic::Request<super::ProtoLookupReq>,
        ) -> Result<tonic::Response<super::ProtoLookupResult>, tonic::Status>;
    }
    #[derive(Debug)]
    pub struct GrpcDirectoryServer<T: GrpcDirectory> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: GrpcDirectory> GrpcDirectoryServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for GrpcDirectoryServer<T>
    where
        T: GrpcDirectory,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/replikv.GrpcDirectory/Register" => {
                    #[allow(non_camel_case_types)]
                    struct RegisterSvc<T: GrpcDirectory>(pub Arc<T>);
                    impl<T: GrpcDirectory> tonic::server::UnaryService<super::ProtoRegisterReq> for RegisterSvc<T> {
                        type Response = super::ProtoRegisterResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoRegisterReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).register(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = RegisterSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/replikv.GrpcDirectory/Deregister" => {
                    #[allow(non_camel_case_types)]
                    struct DeregisterSvc<T: GrpcDirectory>(pub Arc<T>);
                    impl<T: GrpcDirectory> tonic::server::UnaryService<super::ProtoDeregisterReq> for DeregisterSvc<T> {
                        type Response = super::ProtoDeregisterResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoDeregisterReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).deregister(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = DeregisterSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/replikv.GrpcDirectory/Lookup" => {
                    #[allow(non_camel_case_types)]
                    struct LookupSvc<T: GrpcDirectory>(pub Arc<T>);
                    impl<T: GrpcDirectory> tonic::server::UnaryService<super::ProtoLookupReq> for LookupSvc<T> {
                        type Response = super::ProtoLookupResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoLookupReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).lookup(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = LookupSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: GrpcDirectory> Clone for GrpcDirectoryServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: GrpcDirectory> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: GrpcDirectory> tonic::transport::NamedService for GrpcDirectoryServer<T> {
        const NAME: &'static str = "replikv.GrpcDirectory";
    }
}
#[doc = r" Generated server implementations."]
pub mod grpc_kv_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with GrpcKvServer."]
    #[async_trait]
    pub trait GrpcKv: Send + Sync + 'static {
        #[doc = " Served by primary and backups."]
        async fn get(
            &self,
            request: tonic::Request<super::ProtoGetReq>,
        ) -> Result<tonic::Response<super::ProtoGetResult>, tonic::Status>;
        #[doc = " Served by primary only. Backups reply with a redirect."]
        async fn put(
            &self,
            request: tonic::Request<super::ProtoPutReq>,
        ) -> Result<tonic::Response<super::ProtoPutResult>, tonic::Status>;
        #[doc = " Primary -> backup."]
        async fn apply(
            &self,
            request: tonic::Request<super::ProtoApplyReq>,
        ) -> Result<tonic::Response<super::ProtoApplyResult>, tonic::Status>;
        #[doc = " Backup -> primary."]
        async fn snapshot(
            &self,
            request: tonic::Request<super::ProtoSnapshotReq>,
        ) -> Result<tonic::Response<super::ProtoSnapshotResult>, tonic::Status>;
    }
    #[derive(Debug)]
    pub struct GrpcKvServer<T: GrpcKv> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: GrpcKv> GrpcKvServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for GrpcKvServer<T>
    where
        T: GrpcKv,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/replikv.GrpcKv/Get" => {
                    #[allow(non_camel_case_types)]
                    struct GetSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::UnaryService<super::ProtoGetReq> for GetSvc<T> {
                        type Response = super::ProtoGetResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoGetReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/replikv.GrpcKv/Put" => {
                    #[allow(non_camel_case_types)]
                    struct PutSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::UnaryService<super::ProtoPutReq> for PutSvc<T> {
                        type Response = super::ProtoPutResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoPutReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).put(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = PutSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/replikv.GrpcKv/Apply" => {
                    #[allow(non_camel_case_types)]
                    struct ApplySvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::UnaryService<super::ProtoApplyReq> for ApplySvc<T> {
                        type Response = super::ProtoApplyResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoApplyReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).apply(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = ApplySvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/replikv.GrpcKv/Snapshot" => {
                    #[allow(non_camel_case_types)]
                    struct SnapshotSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::UnaryService<super::ProtoSnapshotReq> for SnapshotSvc<T> {
                        type Response = super::ProtoSnapshotResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoSnapshotReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).snapshot(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = SnapshotSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: GrpcKv> Clone for GrpcKvServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: GrpcKv> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: GrpcKv> tonic::transport::NamedService for GrpcKvServer<T> {
        const NAME: &'static str = "replikv.GrpcKv";
    }
}
