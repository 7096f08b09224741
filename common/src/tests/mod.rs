mod credential;
mod http_status;
