//! Snapshot tests pinning the exact shape of generated Go source.

use ctxstrip::{eligible, render_decls, render_unit, synthesize, Forwarder};
use ctxstrip_syntax::{lexer, parser};

fn forwarders(source: &str) -> Vec<Forwarder> {
    let tokens = lexer::lex(source).unwrap();
    let file = parser::parse(&tokens).unwrap();
    eligible(&file).map(|d| synthesize(d).unwrap()).collect()
}

#[test]
fn snapshot_full_unit_with_methods_and_functions() {
    let source = r#"package store

import (
	"context"
	"time"
)

type Store struct{}

func (s *Store) GetWithContext(ctx context.Context, key string) (string, error) {
	return "", nil
}

func (s *Store) ExpireWithContext(ctx context.Context, key string, ttl time.Duration) error {
	return nil
}

func ResetWithContext(ctx context.Context, hard bool) {
}
"#;
    let out = render_unit("store", &forwarders(source)).unwrap();
    insta::assert_snapshot!(out, @r#"
    package store

    import (
    	"context"
    	"time"
    )

    func (s *Store) Get(key string) (string, error) {
    	return s.GetWithContext(context.Background(), key)
    }

    func (s *Store) Expire(key string, ttl time.Duration) error {
    	return s.ExpireWithContext(context.Background(), key, ttl)
    }

    func Reset(hard bool) {
    	ResetWithContext(context.Background(), hard)
    }
    "#);
}

#[test]
fn snapshot_grouped_parameters_and_qualified_types() {
    let source = "package rpc\n\nfunc (c *Client) SendWithContext(ctx context.Context, to, from string, req *pb.Request) (*pb.Response, error) {\n\treturn nil, nil\n}\n";
    let out = render_unit("rpc", &forwarders(source)).unwrap();
    insta::assert_snapshot!(out, @r#"
    package rpc

    import (
    	"context"
    	"pb"
    )

    func (c *Client) Send(to, from string, req *pb.Request) (*pb.Response, error) {
    	return c.SendWithContext(context.Background(), to, from, req)
    }
    "#);
}

#[test]
fn snapshot_snippet_mode() {
    let source = "package p\n\nfunc PingWithContext(ctx context.Context) error { return nil }\n\nfunc LogWithContext(ctx context.Context, msg string) {}\n";
    let out = render_decls(&forwarders(source));
    insta::assert_snapshot!(out, @r"
    func Ping() error {
    	return PingWithContext(context.Background())
    }

    func Log(msg string) {
    	LogWithContext(context.Background(), msg)
    }
    ");
}

#[test]
fn snapshot_named_results_and_slices() {
    let source = "package batch\n\nfunc SplitWithContext(ctx context.Context, items []*Item) (head *Item, rest []*Item) {\n\treturn nil, nil\n}\n";
    let out = render_decls(&forwarders(source));
    insta::assert_snapshot!(out, @r"
    func Split(items []*Item) (head *Item, rest []*Item) {
    	return SplitWithContext(context.Background(), items)
    }
    ");
}
