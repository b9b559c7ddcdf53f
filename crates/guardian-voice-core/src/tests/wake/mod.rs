mod detector;
mod machine;
mod normalize;
