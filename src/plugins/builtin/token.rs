// 令牌插件
// 认证服务器 RPC token/issue、token/verify；认证 Web GET /auth/token/introspect

use actix_web::{web, HttpResponse};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::SecurityConfig;
use crate::errors::GatewayError;
use crate::extension::{AuthServices, AuthWebHandlers, RpcService};
use crate::plugins::Plugin;

pub const TOKEN_PLUGIN: &str = "token";

/// JWT 声明结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 主体
    pub sub: String,
    /// 角色列表
    #[serde(default)]
    pub roles: Vec<String>,
    /// 签发时间
    pub iat: i64,
    /// 过期时间
    pub exp: i64,
    /// 签发者
    pub iss: String,
}

/// 令牌签发与校验
pub struct TokenIssuer {
    secret: String,
    expiration: i64,
    issuer: String,
}

impl TokenIssuer {
    pub fn new(security: &SecurityConfig) -> Self {
        Self {
            secret: security.jwt_secret.clone(),
            // 超出 i64 的有效期在签发时按溢出报错
            expiration: i64::try_from(security.jwt_expiration).unwrap_or(i64::MAX),
            issuer: security.jwt_issuer.clone(),
        }
    }

    /// 签发令牌
    pub fn issue(&self, subject: &str, roles: Vec<String>) -> Result<(String, TokenClaims), GatewayError> {
        if subject.trim().is_empty() {
            return Err(GatewayError::validation("subject", "令牌主体不能为空"));
        }

        let now = Utc::now().timestamp();
        let exp = now
            .checked_add(self.expiration)
            .ok_or_else(|| GatewayError::configuration("令牌有效期超出范围"))?;
        let claims = TokenClaims {
            sub: subject.to_string(),
            roles,
            iat: now,
            exp,
            iss: self.issuer.clone(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| GatewayError::internal(format!("令牌签发失败: {}", e)))?;

        debug!(subject = %claims.sub, exp = claims.exp, "签发令牌");
        Ok((token, claims))
    }

    /// 校验令牌并返回声明
    pub fn verify(&self, token: &str) -> Result<TokenClaims, GatewayError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);

        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| {
            warn!(error = %e, "令牌校验失败");
            GatewayError::authentication(format!("令牌无效: {}", e))
        })
    }
}

/// 令牌插件
pub struct TokenPlugin {
    issuer: Arc<TokenIssuer>,
}

impl TokenPlugin {
    pub fn new(security: &SecurityConfig) -> Self {
        Self {
            issuer: Arc::new(TokenIssuer::new(security)),
        }
    }
}

impl Plugin for TokenPlugin {
    fn name(&self) -> &str {
        TOKEN_PLUGIN
    }

    fn register_auth_web_handlers(&self, handlers: &mut AuthWebHandlers) -> anyhow::Result<()> {
        let issuer = self.issuer.clone();
        handlers.mount("/token", move |cfg| {
            cfg.app_data(web::Data::from(issuer.clone()))
                .route("/introspect", web::get().to(introspect));
        })?;
        Ok(())
    }

    fn register_auth_services(&self, server: &mut AuthServices) -> anyhow::Result<()> {
        server.register(Arc::new(TokenService {
            issuer: self.issuer.clone(),
        }))?;
        Ok(())
    }
}

/// 解析 Bearer 令牌并返回其声明
async fn introspect(
    auth: BearerAuth,
    issuer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, GatewayError> {
    let claims = issuer.verify(auth.token())?;
    Ok(HttpResponse::Ok().json(claims))
}

#[derive(Debug, Deserialize)]
struct IssueParams {
    subject: String,
    #[serde(default)]
    roles: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct VerifyParams {
    token: String,
}

struct TokenService {
    issuer: Arc<TokenIssuer>,
}

#[async_trait]
impl RpcService for TokenService {
    fn name(&self) -> &str {
        TOKEN_PLUGIN
    }

    fn methods(&self) -> &[&'static str] {
        &["issue", "verify"]
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, GatewayError> {
        match method {
            "issue" => {
                let params: IssueParams = serde_json::from_value(params)?;
                let (token, claims) = self.issuer.issue(&params.subject, params.roles)?;
                Ok(json!({ "token": token, "expires_at": claims.exp }))
            }
            "verify" => {
                let params: VerifyParams = serde_json::from_value(params)?;
                let claims = self.issuer.verify(&params.token)?;
                Ok(serde_json::to_value(claims)?)
            }
            other => Err(GatewayError::not_found(format!("RPC 方法 token/{}", other))),
        }
    }
}
