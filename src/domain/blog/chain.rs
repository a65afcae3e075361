//! The user -> blog -> post -> comments chain

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::entity::{Blog, BlogPost, Comment, User};
use super::routes::{RouteTemplates, Routes};
use crate::domain::DomainError;
use crate::domain::chain::{Chain, ChainResult, FetchStep, Step};
use crate::domain::http::{RequestIssuer, StatusPolicy};

/// Assembles comment lookups for a given post title
#[derive(Clone)]
pub struct CommentsChainBuilder {
    issuer: Arc<dyn RequestIssuer>,
    routes: Routes,
    policy: StatusPolicy,
}

impl std::fmt::Debug for CommentsChainBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentsChainBuilder")
            .field("routes", &self.routes)
            .field("policy", &self.policy)
            .finish()
    }
}

impl CommentsChainBuilder {
    pub fn new(
        issuer: Arc<dyn RequestIssuer>,
        templates: &RouteTemplates,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            issuer,
            routes: Routes::try_from(templates)?,
            policy: StatusPolicy::default(),
        })
    }

    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Four steps; the chain's initial input is the username as a JSON string
    pub fn build(&self, post_title: &str) -> Result<Chain, DomainError> {
        let user_route = self.routes.user.clone();
        let fetch_user = self.fetch::<String, User>("fetch_user", move |name| {
            user_route.render(&[("username", name.as_str())])
        });

        let blog_route = self.routes.blog.clone();
        let fetch_blog = self.fetch::<User, Blog>("fetch_blog", move |user| {
            let user_id = user.id.to_string();
            blog_route.render(&[("user_id", user_id.as_str())])
        });

        let post_route = self.routes.post.clone();
        let title = post_title.to_string();
        let fetch_post = self.fetch::<Blog, BlogPost>("fetch_post", move |blog| {
            let blog_id = blog.id.to_string();
            let params = [("blog_id", blog_id.as_str()), ("title", title.as_str())];
            post_route.render(&params)
        });

        let comments_route = self.routes.comments.clone();
        let fetch_comments = self.fetch::<BlogPost, Vec<Comment>>("fetch_comments", move |post| {
            let post_id = post.id.to_string();
            comments_route.render(&[("post_id", post_id.as_str())])
        });

        Chain::new(vec![fetch_user, fetch_blog, fetch_post, fetch_comments])
    }

    /// Build and resolve the chain for one user
    pub async fn fetch_comments(
        &self,
        username: &str,
        post_title: &str,
    ) -> Result<ChainResult, DomainError> {
        let chain = self.build(post_title)?;
        Ok(chain.resolve(Value::String(username.to_string())).await)
    }

    fn fetch<P, T>(
        &self,
        name: &str,
        locator: impl Fn(&P) -> String + Send + Sync + 'static,
    ) -> Arc<dyn Step>
    where
        P: DeserializeOwned + Send + Sync + 'static,
        T: DeserializeOwned + Serialize + Send + Sync + 'static,
    {
        let step = FetchStep::<P, T>::new(name, self.issuer.clone(), locator);
        Arc::new(step.with_status_policy(self.policy))
    }
}
