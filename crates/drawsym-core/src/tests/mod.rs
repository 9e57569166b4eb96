mod mxfile;
mod registry;
