mod common;
mod routing;
mod wizard;
