use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{error, info};
use uuid::Uuid;

use crate::app::Application;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO 오류: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP 리스너입니다. 연결을 수락해 Application으로 전달합니다.
pub struct Server {
    listener: TcpListener,
}

impl Server {
    pub async fn bind(addr: SocketAddr) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            error!(error = %e, %addr, "HTTP 포트 바인딩 실패");
            e
        })?;

        info!(%addr, "HTTP 리스너 시작");
        Ok(Self { listener })
    }

    pub async fn run(self, app: Arc<Application>) -> Result<(), ServerError> {
        loop {
            match self.listener.accept().await {
                Ok((stream, remote_addr)) => {
                    let app = app.clone();
                    tokio::spawn(async move {
                        let io = TokioIo::new(stream);
                        let service = service_fn(move |req| {
                            let app = app.clone();
                            async move {
                                let request_id = Uuid::new_v4().to_string();
                                let method = req.method().clone();
                                let path = req.uri().path().to_string();

                                let response = app.handle(req, Some(remote_addr)).await;

                                info!(
                                    request_id = %request_id,
                                    method = %method,
                                    path = %path,
                                    status = response.status().as_u16(),
                                    "요청 처리 완료"
                                );
                                Ok::<_, std::convert::Infallible>(response)
                            }
                        });

                        if let Err(err) = http1::Builder::new().serve_connection(io, service).await
                        {
                            error!(error = %err, "연결 처리 실패");
                        }
                    });
                }
                Err(e) => {
                    error!(error = %e, "연결 수락 실패");
                }
            }
        }
    }
}
