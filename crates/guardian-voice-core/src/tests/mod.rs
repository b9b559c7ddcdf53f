mod recognition;
mod support;
mod wake;
