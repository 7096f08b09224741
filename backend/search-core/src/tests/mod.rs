mod credential;
mod services;
mod support;
