use std::{
    future::Future,
    marker::PhantomData,
    pin::Pin,
    task::{Context, Poll},
};
use tower::Service;

use crate::{
    arguments::FromArgs,
    command::{CommandResult, ServiceRequest},
    context::CommandContext,
    error::RoError,
};

pub trait Handler<T, R>: Clone + 'static
where
    R: Future<Output = CommandResult>,
{
    fn call(&self, ctx: CommandContext, param: T) -> R;
}

pub struct CommandHandler<F, T, R>
where
    F: Handler<T, R>,
    T: FromArgs,
    R: Future<Output = CommandResult>,
{
    hnd: F,
    _p: PhantomData<fn() -> (T, R)>,
}

impl<F, T, R> CommandHandler<F, T, R>
where
    F: Handler<T, R>,
    T: FromArgs,
    R: Future<Output = CommandResult>,
{
    pub fn new(hnd: F) -> Self {
        Self {
            hnd,
            _p: PhantomData,
        }
    }
}

impl<F, T, R> Clone for CommandHandler<F, T, R>
where
    F: Handler<T, R>,
    T: FromArgs,
    R: Future<Output = CommandResult>,
{
    fn clone(&self) -> Self {
        Self {
            hnd: self.hnd.clone(),
            _p: PhantomData,
        }
    }
}

impl<F, R, K> Service<(CommandContext, ServiceRequest)> for CommandHandler<F, K, R>
where
    F: Handler<K, R>,
    R: Future<Output = CommandResult> + Send + 'static,
    K: FromArgs,
{
    type Response = ();
    type Error = RoError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: (CommandContext, ServiceRequest)) -> Self::Future {
        match req.1 {
            ServiceRequest::Message(mut args) => match K::from_args(&mut args) {
                Ok(args) => Box::pin(self.hnd.call(req.0, args)),
                Err(err) => {
                    let err = RoError::from(err);
                    Box::pin(async move { Err::<(), RoError>(err) })
                }
            },
        }
    }
}

impl<F, K, R> Handler<(K,), R> for F
where
    F: Fn(CommandContext, K) -> R + Clone + 'static,
    R: Future<Output = CommandResult>,
{
    fn call(&self, ctx: CommandContext, (param,): (K,)) -> R {
        (self)(ctx, param)
    }
}
